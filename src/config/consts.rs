// src/config/consts.rs

// Net config
pub const API_BASE: &str = "https://db.ygoprodeck.com/api/v7/cardinfo.php";
pub const USER_AGENT: &str = concat!("ygo_scrape/", env!("CARGO_PKG_VERSION"));

// Local cache
pub const STORE_DIR: &str = ".store";
pub const CONFIG_FILE: &str = "config.toml";
pub const LOG_FILE: &str = "debug.log";
pub const ENV_PREFIX: &str = "YGO_SCRAPE_";

// Scrape
pub const DEFAULT_IMAGES_DIR: &str = "imagens";
pub const IMAGE_EXT: &str = "jpg";
pub const ATTEMPTS: u32 = 2;
pub const TIMEOUT_SECS: u64 = 10;
pub const REQUEST_PAUSE_MS: u64 = 5_000; // between races, be polite

// Export
pub const DEFAULT_MANIFEST: &str = "db/dados_cartas_yugioh.csv";
pub const MANIFEST_HEADERS: [&str; 4] = ["id", "name", "race", "image_path"];
pub const LABEL_HEADER: &str = "race_code";

/// Every monster race the card database knows about, in scrape order.
pub const RACES: [&str; 24] = [
    "Aqua", "Beast", "Beast-Warrior", "Dinosaur", "Dragon",
    "Fairy", "Fiend", "Fish", "Insect", "Machine", "Plant",
    "Psychic", "Pyro", "Reptile", "Rock", "Sea Serpent", "Spellcaster",
    "Thunder", "Warrior", "Winged Beast", "Wyrm", "Zombie",
    "Divine-Beast", "Illusion",
];
