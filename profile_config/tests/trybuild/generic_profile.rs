//! Trybuild fixture verifying the derive carries generics through.

use profile_config::{Bind, LayeredStore, Profile, bind};

#[derive(Debug, Default, Profile)]
struct Pair<T>
where
    T: Bind + serde::de::DeserializeOwned + Default,
{
    #[profile(default = "1")]
    left: T,
    #[profile(default = "2")]
    right: T,
}

fn main() {
    let mut pair = Pair::<u16>::default();
    let _ = bind(&LayeredStore::default(), &mut pair);
}
