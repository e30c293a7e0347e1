#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::sync::Once;

use tempfile::TempDir;

pub const CUISINE_CSV: &str = "\u{feff}ID,Image
Tacos,https://img.example/tacos.png
BBQ,https://img.example/bbq.png
Vietnamese,https://img.example/pho.png
";

pub const RESTAURANT_CSV: &str = r#"ID,Name,CuisineKeywords,Chain,City,Neighborhood,Address,ProfilePicture,MapsLink,Coordinates,Operational
r1,Taco Haven,"Tacos, Burritos",N,San Antonio,Downtown,1 Alamo Plaza,https://img.example/r1.png,https://maps.example/r1,"29.4241,-98.4936",Y
r2,Pearl Street Tacos,Street Tacos,Y,San Antonio,Pearl,303 Pearl Pkwy,https://img.example/r2.png,https://maps.example/r2,"29.4429,-98.4798",Y
r3,Rainey Smoke,"BBQ, Tex-Mex ,Tacos",No,Austin,Downtown,70 Rainey St,https://img.example/r3.png,https://maps.example/r3,"abc,def",Y
r4,Pho Midtown,Vietnamese,Yes,San Antonio,Midtown,10 Main Ave,https://img.example/r4.png,https://maps.example/r4,"29.4500,-98.5000",N
r5,Deep Ellum Pit,BBQ,,Dallas,,2800 Main St,https://img.example/r5.png,https://maps.example/r5,32.78,Y
"#;

pub const CALL_CSV: &str = "RestaurantID,Date,Sentiment,Recommendation,Highlights
r1,2024-03-01,Positive,Visit,Great al pastor
r2,2024-03-02,Neutral,Maybe,Long wait
r1,2024-03-09,Positive,Visit,Friendly staff
";

/// The earliest published layout: display names as ids, split coordinates.
pub const LEGACY_RESTAURANT_CSV: &str = "Restaurant ID,Cuisine,Chain,City,Neighborhood,Address,Restaurant Image,Google Maps Link,Latitude,Longitude
Taco Haven,Tacos,N,San Antonio,Downtown,1 Alamo Plaza,https://img.example/r1.png,https://maps.example/r1,29.4241,-98.4936
Rainey Smoke,BBQ,Y,Austin,Downtown,70 Rainey St,https://img.example/r3.png,https://maps.example/r3,,
";

pub const LEGACY_CUISINE_CSV: &str = "Cuisine ID,Cuisine Image
Tacos,https://img.example/tacos.png
BBQ,https://img.example/bbq.png
";

/// Write the given tables into a fresh directory.
pub fn write_tables(tables: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    for (name, content) in tables {
        write_table(dir.path(), name, content);
    }
    dir
}

pub fn write_table(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content)
        .unwrap_or_else(|e| panic!("Failed to write fixture '{name}': {e}"));
}

pub fn standard_tables() -> TempDir {
    write_tables(&[
        ("Cuisine.csv", CUISINE_CSV),
        ("Restaurant.csv", RESTAURANT_CSV),
        ("Call.csv", CALL_CSV),
    ])
}

static TRACING: Once = Once::new();

pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "dinemap=debug".into()),
            )
            .with_test_writer()
            .try_init();
    });
}
