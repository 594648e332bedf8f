//! Tag name → namespace resolution.
//!
//! HTML and SVG share one tag vocabulary here. Names that exist in both (`a`, `script`, `style`, `title`)
//! resolve to HTML unless written with the synthetic `_svg` suffix, which is stripped again before an element is created.

use hashbrown::HashMap;

/// The [XHTML namespace](https://infra.spec.whatwg.org/#html-namespace).
pub const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// The [SVG namespace](https://infra.spec.whatwg.org/#svg-namespace).
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Separates a tag name from its disambiguating suffix, as in `a_svg`.
pub const SUFFIX_SEPARATOR: char = '_';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
	Html,
	Svg,
}

impl Namespace {
	#[must_use]
	pub fn uri(self) -> &'static str {
		match self {
			Namespace::Html => HTML_NAMESPACE,
			Namespace::Svg => SVG_NAMESPACE,
		}
	}

	/// Maps a namespace URI back to a [`Namespace`], if it is one of the two known ones.
	#[must_use]
	pub fn from_uri(uri: &str) -> Option<Self> {
		match uri {
			HTML_NAMESPACE => Some(Namespace::Html),
			SVG_NAMESPACE => Some(Namespace::Svg),
			_ => None,
		}
	}

	/// The namespace an element with this tag gets when placed into an HTML context.
	#[must_use]
	pub fn for_tag(tag: &str) -> Self {
		resolve(tag).unwrap_or(Namespace::Html)
	}
}

// Canonical spellings. Lookups are case-insensitive, creation uses these.
static SVG_TAGS: &[&str] = &[
	"a_svg",
	"animate",
	"animateMotion",
	"animateTransform",
	"circle",
	"clipPath",
	"defs",
	"desc",
	"discard",
	"ellipse",
	"feBlend",
	"feColorMatrix",
	"feComponentTransfer",
	"feComposite",
	"feConvolveMatrix",
	"feDiffuseLighting",
	"feDisplacementMap",
	"feDistantLight",
	"feDropShadow",
	"feFlood",
	"feFuncA",
	"feFuncB",
	"feFuncG",
	"feFuncR",
	"feGaussianBlur",
	"feImage",
	"feMerge",
	"feMergeNode",
	"feMorphology",
	"feOffset",
	"fePointLight",
	"feSpecularLighting",
	"feSpotLight",
	"feTile",
	"feTurbulence",
	"filter",
	"foreignObject",
	"g",
	"image",
	"line",
	"linearGradient",
	"marker",
	"mask",
	"metadata",
	"mpath",
	"path",
	"pattern",
	"polygon",
	"polyline",
	"radialGradient",
	"rect",
	"script_svg",
	"set",
	"stop",
	"style_svg",
	"svg",
	"switch",
	"symbol",
	"text",
	"textPath",
	"title_svg",
	"tspan",
	"use",
	"view",
];

thread_local! {
	static SVG_TAG_TABLE: HashMap<String, &'static str> = SVG_TAGS
		.iter()
		.map(|&tag| (tag.to_ascii_lowercase(), creation_name(tag)))
		.collect();
}

/// Returns the canonical SVG spelling to create `tag` with, or [`None`] if `tag` is not a known SVG element.
///
/// The lookup is case-insensitive and includes synthetic suffixes: `CLIPPATH` yields `clipPath` and `a_svg` yields `a`.
#[must_use]
pub fn svg_spelling(tag: &str) -> Option<&'static str> {
	SVG_TAG_TABLE.with(|table| table.get(&tag.to_ascii_lowercase()).copied())
}

#[must_use]
pub fn is_svg_tag(tag: &str) -> bool {
	svg_spelling(tag).is_some()
}

/// Resolves the namespace an intrinsic `tag` is created in.
///
/// [`None`] means the default (HTML) creation path.
#[must_use]
pub fn resolve(tag: &str) -> Option<Namespace> {
	if is_svg_tag(tag) {
		Some(Namespace::Svg)
	} else {
		None
	}
}

/// Strips a disambiguating suffix from `tag`, yielding the name passed to the DOM.
#[must_use]
pub fn creation_name(tag: &str) -> &str {
	tag.split(SUFFIX_SEPARATOR).next().unwrap_or(tag)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn resolves_svg_tags_case_insensitively() {
		assert_eq!(resolve("svg"), Some(Namespace::Svg));
		assert_eq!(resolve("circle"), Some(Namespace::Svg));
		assert_eq!(resolve("foreignObject"), Some(Namespace::Svg));
		assert_eq!(resolve("FOREIGNOBJECT"), Some(Namespace::Svg));
		assert_eq!(resolve("lineargradient"), Some(Namespace::Svg));
	}

	#[test]
	fn html_and_colliding_tags_use_the_default_path() {
		for tag in &["div", "span", "a", "script", "style", "title", "my-element", ""] {
			assert_eq!(resolve(tag), None, "{:?}", tag);
		}
	}

	#[test]
	fn synthetic_suffixes() {
		assert_eq!(resolve("a_svg"), Some(Namespace::Svg));
		assert_eq!(resolve("Script_SVG"), Some(Namespace::Svg));
		assert_eq!(creation_name("a_svg"), "a");
		assert_eq!(creation_name("title_svg"), "title");
		assert_eq!(creation_name("circle"), "circle");
		assert_eq!(svg_spelling("style_svg"), Some("style"));
	}

	#[test]
	fn canonical_spelling() {
		assert_eq!(svg_spelling("clippath"), Some("clipPath"));
		assert_eq!(svg_spelling("FEGAUSSIANBLUR"), Some("feGaussianBlur"));
		assert_eq!(svg_spelling("div"), None);
	}

	#[test]
	fn namespace_uris() {
		assert_eq!(Namespace::from_uri(Namespace::Svg.uri()), Some(Namespace::Svg));
		assert_eq!(Namespace::from_uri(Namespace::Html.uri()), Some(Namespace::Html));
		assert_eq!(Namespace::from_uri("http://www.w3.org/1998/Math/MathML"), None);
		assert_eq!(Namespace::for_tag("path"), Namespace::Svg);
		assert_eq!(Namespace::for_tag("p"), Namespace::Html);
	}
}
