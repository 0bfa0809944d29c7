//! Trybuild fixture verifying `#[profile(crate = "...")]` resolves generated
//! paths through a `use ... as` rename.

use profile_config as cfg;
use cfg::{LayeredStore, ProfileResult};

#[derive(Debug, Default, cfg::Profile)]
#[profile(crate = "cfg")]
struct Eureka {
    #[profile(default = "A")]
    zone: String,
}

#[derive(Debug, Default, cfg::Profile)]
#[profile(crate = "cfg", rename_all = "kebab-case")]
struct Service {
    service_eureka: Eureka,
}

fn main() {
    let mut service = Service::default();
    let result: ProfileResult<cfg::BindReport> = cfg::bind(&LayeredStore::default(), &mut service);
    let _ = result;
}
