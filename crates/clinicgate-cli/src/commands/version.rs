//! Version command.

pub fn run() {
    println!("clinicgate {}", env!("CARGO_PKG_VERSION"));
}
