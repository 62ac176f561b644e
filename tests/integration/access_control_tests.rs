//! Role gates on every protected scope

#[cfg(test)]
mod tests {
    use crate::common::{TestContext, send};
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;
    use serde_json::json;

    const ROLES: [&str; 6] = [
        "Admin",
        "WarehouseManager",
        "EmployeeManager",
        "Employee",
        "Customer",
        "Accounting",
    ];

    /// Roles that may GET each scope under the standard role table
    const READERS: &[(&str, &[&str])] = &[
        ("/products", &ROLES),
        ("/menu-items", &ROLES),
        ("/vouchers", &ROLES),
        (
            "/suppliers",
            &["Admin", "WarehouseManager", "EmployeeManager", "Employee", "Accounting"],
        ),
        ("/stock", &["Admin", "WarehouseManager", "EmployeeManager"]),
        ("/employees", &["Admin", "EmployeeManager"]),
        ("/customers", &["Admin", "Accounting"]),
        // WarehouseManager's direct permissions: only it and Admin cover them
        ("/exports", &["Admin", "WarehouseManager"]),
        ("/sales", &["Admin", "Accounting"]),
        ("/roles", &["Admin", "WarehouseManager", "EmployeeManager"]),
        ("/accounts", &["Admin"]),
    ];

    #[actix_web::test]
    async fn test_read_gates_match_role_table() {
        let ctx = TestContext::new();
        let app = crate::init_app!(ctx);

        for (scope, readers) in READERS {
            for role in ROLES {
                let (status, _) = send(&app, ctx.get(scope, role).to_request()).await;
                let expected = if readers.contains(&role) {
                    StatusCode::OK
                } else {
                    StatusCode::FORBIDDEN
                };
                assert_eq!(status, expected, "GET {} as {}", scope, role);
            }
        }
    }

    #[actix_web::test]
    async fn test_anonymous_requests_are_unauthorized() {
        let ctx = TestContext::new();
        let app = crate::init_app!(ctx);

        for (scope, _) in READERS {
            let (status, _) = send(&app, TestRequest::get().uri(scope).to_request()).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "GET {}", scope);
        }
    }

    #[actix_web::test]
    async fn test_unknown_role_claim_is_forbidden_everywhere() {
        let ctx = TestContext::new();
        let app = crate::init_app!(ctx);

        for (scope, _) in READERS {
            let (status, _) = send(&app, ctx.get(scope, "Barista").to_request()).await;
            assert_eq!(status, StatusCode::FORBIDDEN, "GET {}", scope);
        }

        // lowercase spelling is not the Admin role
        let (status, _) = send(&app, ctx.get("/accounts", "admin").to_request()).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_write_requires_write_permission() {
        let ctx = TestContext::new();
        let app = crate::init_app!(ctx);
        let product = crate::common::ProductFactory::create();

        for (role, expected) in [
            ("Customer", StatusCode::FORBIDDEN),
            ("Employee", StatusCode::FORBIDDEN),
            ("Accounting", StatusCode::FORBIDDEN),
            ("WarehouseManager", StatusCode::CREATED),
        ] {
            let mut body = product.clone();
            body["sku"] = json!(format!("SKU-{}", role));
            let (status, _) = send(&app, ctx.post("/products", role, body).to_request()).await;
            assert_eq!(status, expected, "POST /products as {}", role);
        }
    }

    #[actix_web::test]
    async fn test_voucher_management_is_accounting() {
        let ctx = TestContext::new();
        let app = crate::init_app!(ctx);
        let voucher = json!({
            "code": "HAPPYHOUR",
            "discount_percent": 15,
            "valid_from": "2026-01-01",
            "valid_until": "2026-12-31"
        });

        let (status, _) = send(
            &app,
            ctx.post("/vouchers", "WarehouseManager", voucher.clone()).to_request(),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) =
            send(&app, ctx.post("/vouchers", "Accounting", voucher).to_request()).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["times_used"], 0);
    }

    #[actix_web::test]
    async fn test_roles_endpoint_lists_registry() {
        let ctx = TestContext::new();
        let app = crate::init_app!(ctx);

        let (status, body) = send(&app, ctx.get("/roles", "EmployeeManager").to_request()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 6);

        let (status, body) =
            send(&app, ctx.get("/roles/EmployeeManager", "Admin").to_request()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["is_manager"], true);
        assert_eq!(body["data"]["inherits_from"], json!(["Employee"]));
        assert_eq!(
            body["data"]["effective_permissions"].as_array().unwrap().len(),
            9
        );

        let (status, _) = send(&app, ctx.get("/roles/Barista", "Admin").to_request()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
