/// Detect OS and provide Ollama installation instructions
pub fn print_install_guide() {
    println!("[WARNING] Ollama not found on your system\n");

    #[cfg(target_os = "macos")]
    {
        println!("[INSTALL] macOS: brew install ollama");
        println!("   or");
        println!("[DOWNLOAD] Download: https://ollama.com/download/mac\n");
    }

    #[cfg(target_os = "linux")]
    {
        println!("[INSTALL] Linux: curl -fsSL https://ollama.com/install.sh | sh");
        println!("   or");
        println!("[DOWNLOAD] Download: https://ollama.com/download/linux\n");
    }

    #[cfg(target_os = "windows")]
    {
        println!("[DOWNLOAD] Windows: Download from https://ollama.com/download/windows\n");
    }

    println!("After installing Ollama, run this launcher again,");
    println!("or drop --local to use the Docker container instead.");
}
