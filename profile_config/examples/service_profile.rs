//! Binds a service profile from `application.yml`, the environment and the
//! command line, then prints where each value came from.
//!
//! ```text
//! cargo run --example service_profile -- --profiles-active production
//! DEV_EUREKA_ZONE=C cargo run --example service_profile
//! SERVICE_CONFIG=other.yml cargo run --example service_profile
//! ```

use std::io::{self, Write};

use profile_config::{Profile, bind_profile};

#[derive(Debug, Default, Profile)]
#[profile(rename_all = "camelCase")]
struct Eureka {
    #[profile(default = "primary")]
    zone: String,
    #[profile(default = "60")]
    fetch_interval: u32,
}

#[derive(Debug, Default, Profile)]
struct DataSource {
    #[profile(default = "localhost")]
    host: String,
    #[profile(default = "5432")]
    port: u16,
}

#[derive(Debug, Default, Profile)]
#[profile(rename_all = "camelCase")]
struct Service {
    eureka: Eureka,
    data_source: DataSource,
}

fn main() -> Result<(), String> {
    let path = std::env::var("SERVICE_CONFIG").unwrap_or_else(|_| {
        concat!(env!("CARGO_MANIFEST_DIR"), "/examples/application.yml").to_owned()
    });
    let mut service = Service::default();
    let report = bind_profile(&mut service, path.as_str(), true).map_err(|e| e.to_string())?;

    let mut stdout = io::stdout().lock();
    write_line(&mut stdout, &format!("{service:#?}"))?;
    for field in report.iter() {
        write_line(&mut stdout, &format!("{:<24} {}", field.path, field.source))?;
    }
    Ok(())
}

fn write_line(writer: &mut dyn Write, message: &str) -> Result<(), String> {
    writer
        .write_all(message.as_bytes())
        .map_err(|err| err.to_string())?;
    writer.write_all(b"\n").map_err(|err| err.to_string())
}
