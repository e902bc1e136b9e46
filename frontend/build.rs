fn main() {
    let api_url = std::env::var("DASHBOARD_API_URL")
        .unwrap_or_else(|_| "http://localhost:8000".to_string());

    // Fallback when the backend config cannot be loaded
    println!("cargo:rustc-env=DASHBOARD_DEFAULT_API_URL={}", api_url);

    println!("cargo:rerun-if-env-changed=DASHBOARD_API_URL");
}
