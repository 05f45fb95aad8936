//! Demo configuration, read from the page's query string.
//!
//! The settings form submits itself as a plain GET, so the query string is
//! the whole persistence layer: `?order=500&size=1000&clusters=5&edges-renderer=edges-fast`.
//! Unknown keys are ignored and malformed values fall back to their defaults
//! field by field.

use crate::components::cluster_graph::EdgesRenderer;

/// Generation and rendering parameters driven by the settings form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DemoConfig {
	/// Number of nodes to generate.
	pub order: u32,
	/// Number of links to generate.
	pub size: u32,
	/// Number of clusters.
	pub clusters: u32,
	/// Which edge program draws the links.
	pub edges_renderer: EdgesRenderer,
}

impl Default for DemoConfig {
	fn default() -> Self {
		Self {
			order: 5000,
			size: 10000,
			clusters: 3,
			edges_renderer: EdgesRenderer::Default,
		}
	}
}

impl DemoConfig {
	/// Parse a raw query string, with or without the leading `?`.
	pub fn from_query(query: &str) -> Self {
		let mut config = Self::default();
		for pair in query.trim_start_matches('?').split('&') {
			let Some((key, value)) = pair.split_once('=') else {
				continue;
			};
			let value = decode_component(value);
			match key {
				"order" => {
					if let Ok(v) = value.parse() {
						config.order = v;
					}
				}
				"size" => {
					if let Ok(v) = value.parse() {
						config.size = v;
					}
				}
				"clusters" => {
					if let Ok(v) = value.parse() {
						config.clusters = v;
					}
				}
				"edges-renderer" => {
					if let Some(mode) = EdgesRenderer::from_form_value(&value) {
						config.edges_renderer = mode;
					}
				}
				_ => {}
			}
		}
		config
	}

	/// Read the configuration from the current page URL.
	pub fn from_location() -> Self {
		let query = web_sys::window()
			.and_then(|w| w.location().search().ok())
			.unwrap_or_default();
		Self::from_query(&query)
	}
}

/// Decode one `application/x-www-form-urlencoded` value: `+` means space,
/// `%XX` is a byte. Malformed escapes are kept literally.
fn decode_component(value: &str) -> String {
	let mut bytes = Vec::with_capacity(value.len());
	let raw = value.as_bytes();
	let mut i = 0;
	while i < raw.len() {
		match raw[i] {
			b'+' => {
				bytes.push(b' ');
				i += 1;
			}
			b'%' if i + 2 < raw.len() => match hex_pair(raw[i + 1], raw[i + 2]) {
				Some(byte) => {
					bytes.push(byte);
					i += 3;
				}
				None => {
					bytes.push(b'%');
					i += 1;
				}
			},
			byte => {
				bytes.push(byte);
				i += 1;
			}
		}
	}
	String::from_utf8_lossy(&bytes).into_owned()
}

fn hex_pair(hi: u8, lo: u8) -> Option<u8> {
	let hi = (hi as char).to_digit(16)?;
	let lo = (lo as char).to_digit(16)?;
	Some((hi * 16 + lo) as u8)
}
