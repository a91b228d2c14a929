//! wellbore-rs
//!
//! A lightweight Rust library for retrieving and rendering USGS NWIS well
//! construction data. Pairs with the `wellbore` CLI.
//!
//! ### Features
//! - Fetch well-construction and lithology records for a NWIS site
//! - Render the well as a standalone SVG diagram (borehole, casing, seals,
//!   open intervals, lithology) with tooltips and a deduplicated legend
//! - Save the flattened intervals as CSV or JSON in a tidy schema
//! - Quick per-kind summaries (counts, depth extents, max diameter)
//!
//! ### Example
//! ```no_run
//! use wellbore_rs::Client;
//!
//! let client = Client::default();
//! let report = client.fetch_report("433152121281301", None)?;
//! wellbore_rs::viz::render_to_file(&report, "well.svg", &Default::default())?;
//!
//! let rows = report.intervals();
//! wellbore_rs::storage::save_csv(&rows, "intervals.csv")?;
//! let stats = wellbore_rs::stats::kind_summary(&rows);
//! println!("{:#?}", stats);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod models;
pub mod stats;
pub mod storage;
pub mod viz;

pub use api::Client;
pub use models::{Interval, IntervalKind, WellReport};
pub use viz::RenderOptions;
