/// Example program to print the loaded configuration
///
/// Run with: cargo run -p skewer-config --example print_config

fn main() {
    let config = skewer_config::SkewerConfig::load();

    println!("=== Skewer Configuration ===\n");

    println!("Window:");
    println!("  Title: {}", config.window.title);
    println!("  Size: {}x{}", config.window.width, config.window.height);
    println!();

    println!("Shape:");
    println!("  Center: {:?}", config.shape.center);
    println!("  Radius: {}", config.shape.radius);
    println!("  Sides: {}", config.shape.sides);
    println!("  Rotation Offset: {}", config.shape.rotation_offset);
    println!();

    println!("Demo:");
    println!("  Scene: {:?}", config.demo.scene);
    println!("  Extra Presets: {}", config.presets.as_ref().map_or(0, Vec::len));
    println!();

    match toml::to_string_pretty(&config) {
        Ok(toml_str) => {
            println!("=== Serialized Configuration ===");
            println!("{}", toml_str);
        }
        Err(e) => {
            eprintln!("Failed to serialize config: {}", e);
        }
    }
}
