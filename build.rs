fn main() {
    #[cfg(windows)]
    {
        let mut res = winres::WindowsResource::new();
        res.set("ProductName", "relinfo");
        res.set("FileDescription", "Release info updater");
        res.set("InternalName", "relinfo.exe");
        res.set("OriginalFilename", "relinfo.exe");
        res.compile().expect("Failed to compile Windows resources");
    }
}
