//! Checkout over HTTP

#[cfg(test)]
mod tests {
    use crate::common::{TestContext, send};
    use actix_web::http::StatusCode;
    use chrono::{Duration, Utc};
    use coffeeshop_rs::core::models::{MenuItem, Voucher};
    use coffeeshop_rs::storage::Repository;
    use serde_json::json;
    use uuid::Uuid;

    async fn seed_menu_item(ctx: &TestContext, name: &str, price_cents: i64) -> Uuid {
        Repository::<MenuItem>::new(ctx.state.store.clone())
            .create(MenuItem {
                name: name.to_string(),
                category: "coffee".to_string(),
                price_cents,
                ingredients: Vec::new(),
                available: true,
            })
            .await
            .unwrap()
            .id
    }

    async fn seed_voucher(ctx: &TestContext, code: &str, max_uses: Option<u32>) {
        let today = Utc::now().date_naive();
        Repository::<Voucher>::new(ctx.state.store.clone())
            .create(Voucher {
                code: code.to_string(),
                discount_percent: 20,
                valid_from: today - Duration::days(1),
                valid_until: today + Duration::days(30),
                max_uses,
                times_used: 0,
            })
            .await
            .unwrap();
    }

    #[actix_web::test]
    async fn test_customer_places_order_accounting_reads_it() {
        let ctx = TestContext::new();
        let app = crate::init_app!(ctx);
        let espresso = seed_menu_item(&ctx, "Espresso", 280).await;
        let cortado = seed_menu_item(&ctx, "Cortado", 350).await;

        let order = json!({
            "lines": [
                {"menu_item_id": espresso, "quantity": 2},
                {"menu_item_id": cortado, "quantity": 1}
            ]
        });
        let (status, body) = send(&app, ctx.post("/sales", "Customer", order).to_request()).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["subtotal_cents"], 910);
        assert_eq!(body["data"]["total_cents"], 910);
        assert!(body["data"]["recorded_by"].is_string());
        let id = body["data"]["id"].as_str().unwrap().to_string();

        // placing orders does not grant reading the books
        let (status, _) = send(&app, ctx.get("/sales", "Customer").to_request()).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) =
            send(&app, ctx.get(&format!("/sales/{}", id), "Accounting").to_request()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["lines"].as_array().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn test_voucher_applied_once() {
        let ctx = TestContext::new();
        let app = crate::init_app!(ctx);
        let latte = seed_menu_item(&ctx, "Latte", 450).await;
        seed_voucher(&ctx, "FIRSTCUP", Some(1)).await;

        let order = json!({
            "lines": [{"menu_item_id": latte, "quantity": 2}],
            "voucher_code": "FIRSTCUP"
        });

        let (status, body) =
            send(&app, ctx.post("/sales", "Employee", order.clone()).to_request()).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["discount_cents"], 180);
        assert_eq!(body["data"]["total_cents"], 720);

        let (status, body) = send(&app, ctx.post("/sales", "Employee", order).to_request()).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["success"], false);
    }

    #[actix_web::test]
    async fn test_unknown_menu_item_is_bad_request() {
        let ctx = TestContext::new();
        let app = crate::init_app!(ctx);

        let order = json!({"lines": [{"menu_item_id": Uuid::new_v4(), "quantity": 1}]});
        let (status, _) = send(&app, ctx.post("/sales", "Customer", order).to_request()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_sale_correction_needs_manage_sales() {
        let ctx = TestContext::new();
        let app = crate::init_app!(ctx);
        let mocha = seed_menu_item(&ctx, "Mocha", 500).await;

        let order = json!({"lines": [{"menu_item_id": mocha, "quantity": 1}]});
        let (_, body) = send(&app, ctx.post("/sales", "Customer", order).to_request()).await;
        let uri = format!("/sales/{}", body["data"]["id"].as_str().unwrap());

        let (status, _) = send(&app, ctx.delete(&uri, "WarehouseManager").to_request()).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(&app, ctx.delete(&uri, "Accounting").to_request()).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn test_sale_correction_with_overflowing_line_is_rejected() {
        let ctx = TestContext::new();
        let app = crate::init_app!(ctx);
        let mocha = seed_menu_item(&ctx, "Mocha", 500).await;

        let order = json!({"lines": [{"menu_item_id": mocha, "quantity": 1}]});
        let (status, body) = send(&app, ctx.post("/sales", "Customer", order).to_request()).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let correction = json!({
            "lines": [{"menu_item_id": mocha, "quantity": 2, "unit_price_cents": i64::MAX}],
            "subtotal_cents": 0,
            "discount_cents": 0,
            "total_cents": 0
        });
        let (status, body) = send(
            &app,
            ctx.put(&format!("/sales/{}", id), "Accounting", correction)
                .to_request(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "Validation error: amount out of range");
    }
}
