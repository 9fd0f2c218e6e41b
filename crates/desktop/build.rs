fn main() {
    #[cfg(feature = "tauri")]
    tauri_build::build();
}
