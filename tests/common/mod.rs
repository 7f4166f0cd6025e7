// tests/common/mod.rs
#![allow(dead_code)]

use std::{
    cell::RefCell,
    collections::{HashMap, HashSet},
    io::Cursor,
    path::Path,
    time::Duration,
};

use ygo_scrape::{
    api::{parse_listing, Card, MetadataSource},
    core::net::Fetch,
    progress::Progress,
    Result, ScrapeError,
};

pub fn jpeg_bytes(rgb: [u8; 3]) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(16, 16, image::Rgb(rgb));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Jpeg).unwrap();
    buf.into_inner()
}

pub fn write_jpeg(path: &Path, rgb: [u8; 3]) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, jpeg_bytes(rgb)).unwrap();
}

/// Card JSON the way the API lists it.
pub fn card_json(id: u64, name: &str, race: &str, cropped: Option<&str>) -> String {
    match cropped {
        Some(url) => format!(
            r#"{{"id":{id},"name":"{name}","race":"{race}","card_images":[{{"id":{id},"image_url_cropped":"{url}"}}]}}"#
        ),
        None => format!(r#"{{"id":{id},"name":"{name}","race":"{race}"}}"#),
    }
}

pub fn listing(cards: &[String]) -> String {
    format!(r#"{{"data":[{}]}}"#, cards.join(","))
}

/// Canned JSON bodies per race. Unknown races answer HTTP 400 like the real API.
#[derive(Default)]
pub struct FakeSource {
    bodies: HashMap<String, String>,
}

impl FakeSource {
    pub fn with(mut self, race: &str, body: String) -> Self {
        self.bodies.insert(race.to_string(), body);
        self
    }
}

impl MetadataSource for FakeSource {
    fn cards_for(&self, race: &str) -> Result<Vec<Card>> {
        match self.bodies.get(race) {
            Some(body) => parse_listing(race, body),
            None => Err(ScrapeError::Http { status: 400, url: format!("fake://cardinfo?race={race}") }),
        }
    }
}

/// URL → bytes. Unknown URLs 404. URLs in `flaky` fail once with a network
/// error before serving; URLs in `once` serve once, then answer 503.
#[derive(Default)]
pub struct FakeFetcher {
    files: HashMap<String, Vec<u8>>,
    flaky: RefCell<HashSet<String>>,
    once: HashSet<String>,
    calls: RefCell<HashMap<String, usize>>,
}

impl FakeFetcher {
    pub fn serve(mut self, url: &str, bytes: Vec<u8>) -> Self {
        self.files.insert(url.to_string(), bytes);
        self
    }

    pub fn flaky(self, url: &str) -> Self {
        self.flaky.borrow_mut().insert(url.to_string());
        self
    }

    pub fn once(mut self, url: &str) -> Self {
        self.once.insert(url.to_string());
        self
    }

    pub fn calls(&self, url: &str) -> usize {
        self.calls.borrow().get(url).copied().unwrap_or(0)
    }
}

impl Fetch for FakeFetcher {
    fn fetch(&self, url: &str, _timeout: Duration) -> Result<Vec<u8>> {
        let n = {
            let mut calls = self.calls.borrow_mut();
            let n = calls.entry(url.to_string()).or_default();
            *n += 1;
            *n
        };
        if n > 1 && self.once.contains(url) {
            return Err(ScrapeError::Http { status: 503, url: url.to_string() });
        }
        if self.flaky.borrow_mut().remove(url) {
            return Err(ScrapeError::Network { url: url.to_string(), reason: "timed out".into() });
        }
        match self.files.get(url) {
            Some(b) => Ok(b.clone()),
            None => Err(ScrapeError::Http { status: 404, url: url.to_string() }),
        }
    }
}

/// Records what the acquirer reported.
#[derive(Default)]
pub struct RecordingProgress {
    pub begun: Vec<(String, usize)>,
    pub done: usize,
    pub discarded: Vec<u64>,
    pub finished: bool,
}

impl Progress for RecordingProgress {
    fn begin_category(&mut self, category: &str, total: usize) {
        self.begun.push((category.to_string(), total));
    }
    fn card_done(&mut self) {
        self.done += 1;
    }
    fn card_discarded(&mut self, id: u64, _name: &str) {
        self.discarded.push(id);
    }
    fn finish(&mut self) {
        self.finished = true;
    }
}

/// Every regular file under `dir`, recursively.
pub fn files_under(dir: &Path) -> Vec<std::path::PathBuf> {
    let mut out = Vec::new();
    if !dir.exists() {
        return out;
    }
    for entry in std::fs::read_dir(dir).unwrap() {
        let p = entry.unwrap().path();
        if p.is_dir() {
            out.extend(files_under(&p));
        } else {
            out.push(p);
        }
    }
    out.sort();
    out
}
