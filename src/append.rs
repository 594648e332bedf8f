use crate::{
	correct::correct_namespace,
	value::{number_to_string, Child},
};
use tracing::{instrument, trace};
use wasm_bindgen::{JsCast, JsValue};

/// Appends `child` to `parent`.
///
/// - [`Child::Null`] and [`Child::Bool`] append nothing.
/// - [`Child::List`]s are flattened depth-first, in order.
/// - [`Child::Text`] and [`Child::Number`] become text nodes.
/// - Elements go through [`correct_namespace`] first.
/// - Other nodes are appended as-is.
///
/// # Errors
///
/// Iff the DOM rejects an insertion, for example when appending an ancestor of `parent`.
#[instrument(skip(parent, child))]
pub fn append_child(parent: &web_sys::Node, child: Child) -> Result<(), JsValue> {
	match child {
		Child::Null | Child::Bool(_) => Ok(()),
		Child::List(children) => {
			for child in children {
				append_child(parent, child)?;
			}
			Ok(())
		}
		Child::Text(text) => append_text(parent, &text),
		Child::Number(number) => append_text(parent, &number_to_string(number)),
		Child::Node(node) => match node.dyn_into::<web_sys::Element>() {
			Ok(element) => {
				let element = correct_namespace(parent, element)?;
				parent.append_child(&element).map(drop)
			}
			Err(node) => parent.append_child(&node).map(drop),
		},
	}
}

fn append_text(parent: &web_sys::Node, text: &str) -> Result<(), JsValue> {
	if cfg!(feature = "dangerous-logging") {
		trace!(text, "Appending text.");
	}
	let text = crate::owner_document(parent).create_text_node(text);
	parent.append_child(&text).map(drop)
}
