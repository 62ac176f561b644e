//! Registration, login and account management over HTTP

#[cfg(test)]
mod tests {
    use crate::common::fixtures::{ADMIN_PASSWORD, ADMIN_USERNAME};
    use crate::common::{TestContext, send};
    use actix_web::http::StatusCode;
    use actix_web::http::header::AUTHORIZATION;
    use actix_web::test::TestRequest;
    use serde_json::{Value, json};

    fn register_body(username: &str) -> Value {
        json!({
            "username": username,
            "email": format!("{}@coffee.test", username),
            "password": "Flat-White-2026"
        })
    }

    // ==================== Registration ====================

    #[actix_web::test]
    async fn test_register_then_login_then_me() {
        let ctx = TestContext::new();
        let app = crate::init_app!(ctx);

        let req = TestRequest::post()
            .uri("/auth/register")
            .set_json(register_body("alice"))
            .to_request();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["role"], "Customer");
        assert!(body["data"].get("password_hash").is_none());

        let req = TestRequest::post()
            .uri("/auth/login")
            .set_json(json!({"username": "alice", "password": "Flat-White-2026"}))
            .to_request();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        let token = body["data"]["access_token"].as_str().unwrap().to_string();
        assert_eq!(body["data"]["token_type"], "Bearer");

        let req = TestRequest::get()
            .uri("/auth/me")
            .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["username"], "alice");
        assert_eq!(body["data"]["role"], "Customer");
        assert_eq!(body["data"]["is_manager"], false);
        assert_eq!(
            body["data"]["permissions"],
            json!(["ViewProducts", "PlaceOrders"])
        );
    }

    #[actix_web::test]
    async fn test_register_duplicate_is_conflict() {
        let ctx = TestContext::new();
        let app = crate::init_app!(ctx);

        for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
            let req = TestRequest::post()
                .uri("/auth/register")
                .set_json(register_body("bob"))
                .to_request();
            let (status, _) = send(&app, req).await;
            assert_eq!(status, expected);
        }
    }

    #[actix_web::test]
    async fn test_register_invalid_email_is_bad_request() {
        let ctx = TestContext::new();
        let app = crate::init_app!(ctx);

        let mut body = register_body("carol");
        body["email"] = json!("not-an-email");
        let req = TestRequest::post().uri("/auth/register").set_json(body).to_request();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    // ==================== Login ====================

    #[actix_web::test]
    async fn test_login_with_wrong_password_is_unauthorized() {
        let ctx = TestContext::new();
        ctx.bootstrap().await;
        let app = crate::init_app!(ctx);

        let req = TestRequest::post()
            .uri("/auth/login")
            .set_json(json!({"username": ADMIN_USERNAME, "password": "nope"}))
            .to_request();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);
    }

    #[actix_web::test]
    async fn test_me_without_token_is_unauthorized() {
        let ctx = TestContext::new();
        let app = crate::init_app!(ctx);

        let (status, body) = send(&app, TestRequest::get().uri("/auth/me").to_request()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    }

    #[actix_web::test]
    async fn test_refresh_issues_new_access_token() {
        let ctx = TestContext::new();
        ctx.bootstrap().await;
        let app = crate::init_app!(ctx);

        let req = TestRequest::post()
            .uri("/auth/login")
            .set_json(json!({"username": ADMIN_USERNAME, "password": ADMIN_PASSWORD}))
            .to_request();
        let (_, body) = send(&app, req).await;
        let refresh_token = body["data"]["refresh_token"].as_str().unwrap().to_string();

        let req = TestRequest::post()
            .uri("/auth/refresh")
            .set_json(json!({"refresh_token": refresh_token}))
            .to_request();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"]["access_token"].is_string());
    }

    // ==================== Account management ====================

    #[actix_web::test]
    async fn test_admin_promotes_customer() {
        let ctx = TestContext::new();
        ctx.bootstrap().await;
        let app = crate::init_app!(ctx);

        let req = TestRequest::post()
            .uri("/auth/register")
            .set_json(register_body("dave"))
            .to_request();
        let (_, body) = send(&app, req).await;
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let req = TestRequest::post()
            .uri("/auth/login")
            .set_json(json!({"username": ADMIN_USERNAME, "password": ADMIN_PASSWORD}))
            .to_request();
        let (_, body) = send(&app, req).await;
        let admin = format!("Bearer {}", body["data"]["access_token"].as_str().unwrap());

        let req = TestRequest::put()
            .uri(&format!("/accounts/{}/role", id))
            .insert_header((AUTHORIZATION, admin.clone()))
            .set_json(json!({"role": "Employee"}))
            .to_request();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["role"], "Employee");

        let req = TestRequest::put()
            .uri(&format!("/accounts/{}/role", id))
            .insert_header((AUTHORIZATION, admin))
            .set_json(json!({"role": "Barista"}))
            .to_request();
        let (status, _) = send(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_account_listing_requires_manage_accounts() {
        let ctx = TestContext::new();
        ctx.bootstrap().await;
        let app = crate::init_app!(ctx);

        let (status, _) = send(&app, ctx.get("/accounts", "EmployeeManager").to_request()).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = send(&app, ctx.get("/accounts", "Admin").to_request()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["pagination"]["total"], 1);
        assert_eq!(body["data"]["items"][0]["username"], ADMIN_USERNAME);
        assert!(body["data"]["items"][0].get("password_hash").is_none());
    }
}
