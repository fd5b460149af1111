use std::{env, path::PathBuf, sync::Once};

static START: Once = Once::new();

/// Set cwd to the tests directory so fixtures resolve by relative path
pub fn setup() {
    START.call_once(|| {
        let pth = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests");
        println!("Initializing tests - using testdir {}", pth.display());
        assert!(env::set_current_dir(pth).is_ok());
    });
}

#[allow(dead_code)]
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from("fixtures").join(name)
}
