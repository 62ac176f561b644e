//! Configuration loading and startup checks

#[cfg(test)]
mod tests {
    use crate::common::TestContext;
    use coffeeshop_rs::Config;
    use coffeeshop_rs::server::ServerBuilder;
    use std::io::Write;

    const YAML: &str = r#"
server:
  port: 9090
auth:
  jwt_secret: Config-Test-Secret-Key-Long-Enough-123!
  rbac:
    default_role: Employee
    roles:
      Customer:
        permissions: [ViewProducts, PlaceOrders]
      Employee:
        inherits_from: [Customer]
        permissions: [ViewSuppliers]
      Admin:
        grants_all: true
storage:
  max_page_size: 50
"#;

    #[tokio::test]
    async fn test_load_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(YAML.as_bytes()).unwrap();

        let config = Config::from_file(file.path()).await.unwrap();
        assert_eq!(config.server().port, 9090);
        assert_eq!(config.auth().rbac.default_role, "Employee");
        assert_eq!(config.storage().max_page_size, 50);
        assert_eq!(config.auth().rbac.roles.len(), 3);
    }

    #[tokio::test]
    async fn test_configured_role_table_drives_server() {
        let config = Config::from_yaml(YAML).unwrap();
        let server = ServerBuilder::new().with_config(config).build().await.unwrap();

        let registry = server.state().auth.authorizer().registry();
        assert_eq!(registry.roles().len(), 3);
    }

    #[tokio::test]
    async fn test_cyclic_role_table_aborts_startup() {
        let yaml = r#"
auth:
  jwt_secret: Config-Test-Secret-Key-Long-Enough-123!
  rbac:
    roles:
      Customer:
        inherits_from: [Employee]
      Employee:
        inherits_from: [Customer]
"#;
        let config = Config::from_yaml(yaml).unwrap();
        let err = ServerBuilder::new().with_config(config).build().await.err().unwrap();
        assert!(err.to_string().contains("cycle"));
    }

    #[tokio::test]
    async fn test_unknown_permission_aborts_startup() {
        let yaml = r#"
auth:
  jwt_secret: Config-Test-Secret-Key-Long-Enough-123!
  rbac:
    roles:
      Customer:
        permissions: [BrewCoffee]
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert!(ServerBuilder::new().with_config(config).build().await.is_err());
    }

    #[tokio::test]
    async fn test_server_creates_bootstrap_admin() {
        let server = ServerBuilder::new()
            .with_config(TestContext::config())
            .build()
            .await
            .unwrap();

        assert_eq!(server.state().auth.accounts().count().await.unwrap(), 1);
    }

    #[test]
    fn test_admin_default_role_is_rejected() {
        let yaml = r#"
auth:
  jwt_secret: Config-Test-Secret-Key-Long-Enough-123!
  rbac:
    default_role: Admin
"#;
        assert!(Config::from_yaml(yaml).is_err());
    }
}
