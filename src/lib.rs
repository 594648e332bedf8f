#![doc(html_root_url = "https://docs.rs/dom-pragma/0.0.1")]
#![warn(clippy::pedantic)]
//! A JSX-style pragma pair that turns `(tag, props, children)` calls directly into DOM nodes.
//!
//! There is no virtual DOM, diffing or component lifecycle: [`create_element`] and [`create_fragment`] run to completion and hand
//! the finished nodes to the caller. Along the way, elements are created in the namespace their tag implies and
//! [re-created](`correct_namespace`) if they end up under a parent whose namespace context disagrees.

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

mod append;
mod correct;
mod factory;
pub mod namespace;
mod props;
mod value;

pub use append::append_child;
pub use correct::correct_namespace;
pub use factory::{create_element, create_fragment, create_intrinsic_element, Component, Tag};
pub use props::{set_prop, style_declarations, BOOLEAN_ATTRIBUTES, DOM_PROPERTIES};
pub use value::{number_to_string, Child, PropValue, Props, Ref, RefHolder, Style, StyleValue};

use wasm_bindgen::{JsCast, UnwrapThrowExt};

fn document() -> web_sys::Document {
	web_sys::window()
		.expect_throw("dom-pragma: No global `window` found.")
		.document()
		.expect_throw("dom-pragma: No document found for the global `window`.")
}

fn owner_document(node: &web_sys::Node) -> web_sys::Document {
	match node.owner_document() {
		Some(document) => document,
		// Only documents themselves have no owner document.
		None => node.dyn_ref::<web_sys::Document>().cloned().unwrap_or_else(document),
	}
}
