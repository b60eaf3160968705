//! The `windcheck init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create windcheck.toml
    if std::path::Path::new("windcheck.toml").exists() {
        println!("windcheck.toml already exists, skipping.");
    } else {
        std::fs::write("windcheck.toml", SAMPLE_CONFIG)?;
        println!("Created windcheck.toml");
    }

    // Create example catalog
    std::fs::create_dir_all("catalogs")?;
    let example_path = std::path::Path::new("catalogs/wind-energy.toml");
    if example_path.exists() {
        println!("catalogs/wind-energy.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_CATALOG)?;
        println!("Created catalogs/wind-energy.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit windcheck.toml with your API key and service account file");
    println!("  2. Run: windcheck validate --catalog catalogs/wind-energy.toml");
    println!("  3. Run: windcheck run --catalog catalogs/wind-energy.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# windcheck configuration

[scorer]
api_key = "${OPENAI_API_KEY}"
model = "gpt-4o"
max_tokens = 512
temperature = 0.0

[sheets]
# Service-account key with spreadsheet + drive scope
service_account_file = "service-account.json"
# Must match the spreadsheet's name exactly
spreadsheet_name = "Wind_Ergebnisse"
"#;

const EXAMPLE_CATALOG: &str = r#"[catalog]
id = "wind-energy"
name = "Technisches Assessment: Windenergie"
description = "Technische Fragen zu Umrichter- und Pitch-Systemen"

[[questions]]
id = "igbt-switching"
text = "Warum darf ein IGBT nicht unter Last geschaltet werden, wenn die Ansteuerung fehlt?"
pattern = "Gefahr des 'Latching', Zerstörung durch unkontrolliertes Durchschalten."

[[questions]]
id = "bladder-accumulator"
text = "Woran erkennen Sie bei einer Sichtprüfung, dass ein hydraulischer Blasenspeicher defekt sein könnte?"
pattern = "Pumpe läuft zu oft (kurze Zyklen), Druck fällt schlagartig ab, ruckartige Bewegung."
"#;
