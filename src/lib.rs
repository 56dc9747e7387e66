// Library root
// -----------
// This crate ships two binaries built from the modules below:
// `novel-menu`, the interactive front-end, and `novel-analyzer`, the
// chunked-text processor the menu invokes as a subprocess.
//
// Module responsibilities:
// - `config`: Environment-driven settings (service URL, processor
//   command, pager, chunk-size policy).
// - `api`: Blocking HTTP client for the local Ollama service (version
//   probe, model tags, chat calls with retries).
// - `preflight`: Start-up checks that return outcomes for the caller
//   to decide on, instead of exiting from inside the check.
// - `params`: The five per-invocation session parameters with their
//   defaults and validation.
// - `invoke`: Construction and execution of the processor command line.
// - `ui`: The terminal menu loop and prompt flows.
// - `chunk`: Chapter detection and size-bounded text splitting.
// - `analyzer`: The per-chunk processing pipeline.
// - `report`: Rendering of the final analysis report.
//
// The menu stays strictly on the `invoke` side of the boundary: the
// front-end never parses text or talks to the model itself.
pub mod analyzer;
pub mod api;
pub mod chunk;
pub mod config;
pub mod invoke;
pub mod params;
pub mod preflight;
pub mod report;
pub mod ui;
