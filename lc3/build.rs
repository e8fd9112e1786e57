fn main() {
    println!("cargo:rerun-if-env-changed=LC3_LIB_DIR");

    if std::env::var_os("CARGO_FEATURE_LIBLC3").is_none() {
        return;
    }

    if let Ok(dir) = std::env::var("LC3_LIB_DIR") {
        println!("cargo:rustc-link-search=native={}", dir);
    }
    println!("cargo:rustc-link-search=native=/opt/homebrew/lib");
    println!("cargo:rustc-link-search=native=/usr/local/lib");
    println!("cargo:rustc-link-lib=lc3");
}
