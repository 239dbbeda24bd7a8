fn main() {
    if std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default() == "windows" {
        let mut res = winres::WindowsResource::new();
        res.set("ProductName", "Stock History Viewer");
        res.set("FileDescription", "NSE historical stock data viewer");
        res.compile().expect("Failed to compile Windows resources");
    }
}
