use crate::namespace::{self, Namespace};
use tracing::{debug, instrument, trace};
use wasm_bindgen::{JsCast, JsValue, UnwrapThrowExt};

/// Returns `child`, or a rebuilt copy of it if its namespace doesn't fit under `parent`.
///
/// - Under a `foreignObject`, known SVG tags stay SVG and everything else becomes HTML.
/// - Under any other SVG element, everything is SVG.
/// - Under an HTML element, known SVG tags become SVG and everything else HTML.
/// - Under anything else (a fragment, a document, a MathML element…), `child` is returned unchanged.
///
/// An element's namespace can't be changed in place, so a mismatched `child` is recreated with its attributes
/// and descendants, which are corrected recursively against the new element.
/// Correctly namespaced descendants are moved over as-is.
///
/// Event listeners and properties set directly on a rebuilt element are **not** carried over.
///
/// # Errors
///
/// Iff the DOM rejects creating or populating the replacement element.
#[instrument(skip(parent, child), fields(tag = %child.local_name()))]
pub fn correct_namespace(parent: &web_sys::Node, child: web_sys::Element) -> Result<web_sys::Element, JsValue> {
	let expected = match expected_namespace(parent, &child) {
		Some(expected) => expected,
		None => return Ok(child),
	};
	if namespace_of(&child) == Some(expected) {
		return Ok(child);
	}
	rebuild(&child, expected)
}

fn namespace_of(element: &web_sys::Element) -> Option<Namespace> {
	Namespace::from_uri(&element.namespace_uri()?)
}

fn expected_namespace(parent: &web_sys::Node, child: &web_sys::Element) -> Option<Namespace> {
	let parent = parent.dyn_ref::<web_sys::Element>()?;
	if parent.local_name() == "foreignObject" {
		return Some(Namespace::for_tag(&child.local_name()));
	}
	match namespace_of(parent)? {
		Namespace::Svg => Some(Namespace::Svg),
		Namespace::Html => Some(Namespace::for_tag(&child.local_name())),
	}
}

fn rebuild(child: &web_sys::Element, namespace: Namespace) -> Result<web_sys::Element, JsValue> {
	let local_name = child.local_name();
	let name = match namespace {
		Namespace::Html => local_name.to_lowercase(),
		Namespace::Svg => namespace::svg_spelling(&local_name).map_or(local_name, str::to_owned),
	};
	debug!("Rebuilding <{}> in the {:?} namespace (was {:?}).", name, namespace, child.namespace_uri());

	let document = child.owner_document().expect_throw("dom-pragma: No owner document found for mis-namespaced element.");
	let rebuilt = document.create_element_ns(Some(namespace.uri()), &name)?;

	let attributes = child.attributes();
	for i in 0..attributes.length() {
		let attribute = attributes.item(i).expect_throw("dom-pragma: Attribute index out of range.");
		if cfg!(feature = "dangerous-logging") {
			trace!(name = %attribute.name(), value = %attribute.value(), "Copying attribute.");
		}
		match attribute.namespace_uri() {
			Some(attribute_namespace) => rebuilt.set_attribute_ns(Some(&attribute_namespace), &attribute.name(), &attribute.value())?,
			None => rebuilt.set_attribute(&attribute.name(), &attribute.value())?,
		}
	}

	// Snapshot first: Moving nodes out changes the live list.
	let child_nodes = child.child_nodes();
	let child_nodes: Vec<web_sys::Node> = (0..child_nodes.length()).filter_map(|i| child_nodes.item(i)).collect();
	for node in child_nodes {
		match node.dyn_into::<web_sys::Element>() {
			Ok(element) => {
				let element = correct_namespace(&rebuilt, element)?;
				rebuilt.append_child(&element)?;
			}
			Err(node) => {
				rebuilt.append_child(&node.clone_node()?)?;
			}
		}
	}

	Ok(rebuilt)
}
