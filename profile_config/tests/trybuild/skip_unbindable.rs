//! Trybuild fixture verifying skipped fields need not implement `Bind`.

use profile_config::{LayeredStore, Profile, bind};

#[derive(Debug, Default)]
struct Handle(u32);

#[derive(Debug, Default, Profile)]
struct Runtime {
    #[profile(default = "4")]
    workers: usize,
    #[profile(skip)]
    handle: Handle,
    #[profile(key = "_")]
    spare: Option<Handle>,
}

fn main() {
    let mut runtime = Runtime::default();
    let _ = bind(&LayeredStore::default(), &mut runtime);
    let Runtime { handle, spare, .. } = runtime;
    let _ = (handle.0, spare);
}
