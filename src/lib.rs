//! Nowshowing — renders a "now showing" sign for one room.
//!
//! A sign is described by a `config.json` (colors, fonts, painting, artist,
//! bartender) and a `room.txt`, fetched from a base URL or directory. The
//! crate turns those into writes against named slots of a host HTML page and
//! keeps the page's clock current.
//!
//! # Quick start
//!
//! ```no_run
//! use chrono::NaiveTime;
//! use nowshowing::display::Display;
//! use nowshowing::page::HtmlPage;
//! use nowshowing::render::RenderOptions;
//! use nowshowing::source::DirSource;
//!
//! # async fn example() {
//! let display = Display::new(Box::new(DirSource::new("/srv/signs/rainier")), RenderOptions::default());
//! let mut page = HtmlPage::default_host();
//! let now = NaiveTime::from_hms_opt(20, 15, 0).unwrap();
//! display.load(&mut page, now).await;
//! println!("{}", page.to_html());
//! # }
//! ```

pub mod build_info;
pub mod clock;
pub mod content;
pub mod display;
pub mod error;
pub mod page;
pub mod render;
pub mod sign;
pub mod source;
pub mod style;
#[cfg(test)]
pub mod testsupport;
pub mod tracing_config;
