//! # shrinkpic
//!
//! Compress a single image until it fits under a byte-size budget.
//!
//! # Architecture: Linear Pipeline
//!
//! ```text
//! 1. Resolve   argv        →  Settings        (decode input, split name, check output dir, budget)
//! 2. Report    input size  →  stdout
//! 3. Search    Settings    →  accepted quality (trial encodes in a scratch file)
//! 4. Write     quality     →  out/<name>_<unix time>.<ext>
//! 5. Report    quality + output size → stdout
//! ```
//!
//! The search walks a fixed schedule (94, 89, 84, …, 4) and stops at the first
//! quality whose encoding is no larger than the budget. If none fits, the run
//! fails and nothing is written.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`args`] | `clap` CLI surface and argument validation into [`args::Settings`] |
//! | [`config`] | Optional TOML config: search schedule, encoder effort, budget semantics |
//! | [`units`] | Unit table (B…YB), [`units::format_size`], [`units::SizeBudget`] |
//! | [`search`] | Quality search over a scratch file |
//! | [`naming`] | `<stem>_<timestamp>.<ext>` output file names |
//! | [`writer`] | Final encode into the output directory |
//! | [`compress`] | Search + write, producing a [`compress::CompressReport`] |
//! | [`imaging`] | Codec backend trait and the `image`-crate implementation |
//! | [`output`] | Stdout report formatting |
//!
//! # Design Decisions
//!
//! ## Budgets Follow the Unit
//!
//! `-s 500 -t KB` is a 512 000-byte budget. Setting
//! `budget.scale_with_unit = false` in the config makes `-s` always count raw
//! bytes and leaves `-t` as a display-only unit.
//!
//! ## Scratch Files Clean Themselves Up
//!
//! Trial encodings go to a uniquely named temp file that is deleted when the
//! search returns, whatever the outcome. Concurrent runs never share a
//! scratch path.
//!
//! ## Pure-Rust Codecs
//!
//! Decoding and encoding go through the `image` crate behind the
//! [`imaging::ImageBackend`] trait, so the binary has no system library
//! dependencies and tests can swap in a mock codec with scripted sizes.

pub mod args;
pub mod compress;
pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod search;
pub mod units;
pub mod writer;
