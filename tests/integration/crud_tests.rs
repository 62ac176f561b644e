//! CRUD behaviour of the collection endpoints

#[cfg(test)]
mod tests {
    use crate::common::{ProductFactory, TestContext, send};
    use actix_web::http::StatusCode;
    use serde_json::json;
    use uuid::Uuid;

    #[actix_web::test]
    async fn test_product_lifecycle() {
        let ctx = TestContext::new();
        let app = crate::init_app!(ctx);

        let (status, body) = send(
            &app,
            ctx.post("/products", "WarehouseManager", ProductFactory::with_sku("HB-250"))
                .to_request(),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["data"]["id"].as_str().unwrap().to_string();
        let uri = format!("/products/{}", id);

        let (status, body) = send(&app, ctx.get(&uri, "Customer").to_request()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["sku"], "HB-250");

        let mut changed = ProductFactory::with_sku("HB-250");
        changed["unit_price_cents"] = json!(1499);
        let (status, body) =
            send(&app, ctx.put(&uri, "WarehouseManager", changed).to_request()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["unit_price_cents"], 1499);

        let (status, _) = send(&app, ctx.delete(&uri, "WarehouseManager").to_request()).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(&app, ctx.get(&uri, "Customer").to_request()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[actix_web::test]
    async fn test_duplicate_sku_is_conflict() {
        let ctx = TestContext::new();
        let app = crate::init_app!(ctx);

        for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
            let (status, _) = send(
                &app,
                ctx.post("/products", "Admin", ProductFactory::with_sku("DUP-1"))
                    .to_request(),
            )
            .await;
            assert_eq!(status, expected);
        }
    }

    #[actix_web::test]
    async fn test_invalid_record_is_rejected() {
        let ctx = TestContext::new();
        let app = crate::init_app!(ctx);

        let mut product = ProductFactory::create();
        product["unit_price_cents"] = json!(-5);
        let (status, body) = send(&app, ctx.post("/products", "Admin", product).to_request()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (status, _) = send(
            &app,
            ctx.post("/products", "Admin", json!({"name": "missing fields"}))
                .to_request(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_list_pagination_and_search() {
        let ctx = TestContext::new();
        let app = crate::init_app!(ctx);

        for name in ["Colombia", "Kenya", "Kenya Decaf", "Brazil", "Peru"] {
            let mut product = ProductFactory::create();
            product["name"] = json!(name);
            send(&app, ctx.post("/products", "Admin", product).to_request()).await;
        }

        let (status, body) =
            send(&app, ctx.get("/products?page=2&limit=2", "Customer").to_request()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["items"].as_array().unwrap().len(), 2);
        assert_eq!(body["data"]["items"][0]["name"], "Kenya Decaf");
        assert_eq!(body["data"]["pagination"]["total"], 5);
        assert_eq!(body["data"]["pagination"]["pages"], 3);
        assert_eq!(body["data"]["pagination"]["has_next"], true);

        let (_, body) = send(&app, ctx.get("/products?q=kenya", "Customer").to_request()).await;
        assert_eq!(body["data"]["pagination"]["total"], 2);

        let (status, _) =
            send(&app, ctx.get("/products?limit=1000", "Customer").to_request()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_missing_record_update_is_not_found() {
        let ctx = TestContext::new();
        let app = crate::init_app!(ctx);

        let uri = format!("/suppliers/{}", Uuid::new_v4());
        let (status, _) = send(
            &app,
            ctx.put(&uri, "WarehouseManager", json!({"name": "Roastery"}))
                .to_request(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_malformed_record_id_is_json_bad_request() {
        let ctx = TestContext::new();
        let app = crate::init_app!(ctx);

        let (status, body) =
            send(&app, ctx.get("/products/not-a-uuid", "Customer").to_request()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
    }

    #[actix_web::test]
    async fn test_low_stock_report() {
        let ctx = TestContext::new();
        let app = crate::init_app!(ctx);
        let product_id = Uuid::new_v4();

        for (location, quantity) in [("shelf-a", 2), ("shelf-b", 40)] {
            let item = json!({
                "product_id": product_id,
                "location": location,
                "quantity": quantity,
                "reorder_level": 5
            });
            let (status, _) =
                send(&app, ctx.post("/stock", "WarehouseManager", item).to_request()).await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, body) = send(&app, ctx.get("/stock/low", "EmployeeManager").to_request()).await;
        assert_eq!(status, StatusCode::OK);
        let low = body["data"].as_array().unwrap();
        assert_eq!(low.len(), 1);
        assert_eq!(low[0]["location"], "shelf-a");

        // EmployeeManager is a manager but lacks ManageInventory
        let item = json!({"product_id": product_id, "location": "shelf-c", "quantity": 1});
        let (status, _) = send(&app, ctx.post("/stock", "EmployeeManager", item).to_request()).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_employee_records() {
        let ctx = TestContext::new();
        let app = crate::init_app!(ctx);
        let employee = json!({
            "full_name": "Grace Hopper",
            "email": "grace@coffee.test",
            "position": "barista",
            "hourly_rate_cents": 1650,
            "hired_on": "2025-09-01"
        });

        let (status, _) = send(
            &app,
            ctx.post("/employees", "EmployeeManager", employee).to_request(),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _) = send(&app, ctx.get("/employees", "Employee").to_request()).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
