//! Sample configuration documents.

/// Two service profiles with `dev` active, as a Spring-style `application.yml`.
pub const SERVICE_PROFILES_YAML: &str = "\
profiles:
  active: dev
dev:
  eureka:
    zone: A
    fetchInterval: 30
  dataSource:
    host: dev-db
production:
  eureka:
    zone: B
    fetchInterval: 10
  dataSource:
    host: prod-db
    port: 6432
";

/// A document without profiles; fields bind from the root.
pub const FLAT_TOML: &str = r#"
[eureka]
zone = "A"
fetchInterval = 15

[dataSource]
host = "flat-db"
"#;

/// The same shape as [`FLAT_TOML`], in JSON.
pub const FLAT_JSON: &str = r#"{
  "eureka": { "zone": "A", "fetchInterval": 15 },
  "dataSource": { "host": "flat-db" }
}"#;

/// Selects a profile that the document does not contain.
pub const MISSING_PROFILE_YAML: &str = "\
profiles:
  active: staging
dev:
  eureka:
    zone: A
";
