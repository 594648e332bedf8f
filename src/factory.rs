use crate::{
	append::append_child,
	namespace,
	props::set_prop,
	value::{Child, PropValue, Props},
};
use core::fmt::{self, Debug, Formatter};
use js_sys::{Function, Reflect};
use tracing::{instrument, trace_span, warn};
use wasm_bindgen::{JsCast, JsValue};

/// A component: Receives its props, including `children`, and returns what it renders.
pub type Component<'a> = dyn 'a + Fn(Props) -> Result<Child, JsValue>;

/// What to create: An intrinsic HTML or SVG element by name, or a [`Component`] to invoke.
#[derive(Clone, Copy)]
pub enum Tag<'a> {
	Intrinsic(&'a str),
	Component(&'a Component<'a>),
}

impl<'a> Tag<'a> {
	pub fn component(component: &'a Component<'a>) -> Self {
		Tag::Component(component)
	}
}

impl<'a> From<&'a str> for Tag<'a> {
	fn from(name: &'a str) -> Self {
		Tag::Intrinsic(name)
	}
}

impl<'a> From<&'a String> for Tag<'a> {
	fn from(name: &'a String) -> Self {
		Tag::Intrinsic(name)
	}
}

impl Debug for Tag<'_> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Tag::Intrinsic(name) => f.debug_tuple("Intrinsic").field(name).finish(),
			Tag::Component(_) => f.write_str("Component(..)"),
		}
	}
}

/// The element factory.
///
/// Components are invoked with `props` plus `children` (replacing any `children` prop) and their result is returned verbatim.
/// Intrinsic tags are created through [`create_intrinsic_element`] in the global document.
///
/// # Errors
///
/// Iff the component or the DOM fails.
pub fn create_element<'a>(tag: impl Into<Tag<'a>>, props: Option<Props>, children: Vec<Child>) -> Result<Child, JsValue> {
	let tag = tag.into();
	let span = trace_span!("create_element", ?tag);
	let _enter = span.enter();
	match tag {
		Tag::Component(component) => {
			let span = trace_span!("Invoking component", children = children.len());
			let _enter = span.enter();
			let mut props = props.unwrap_or_default();
			props.insert("children", Child::List(children));
			component(props)
		}
		Tag::Intrinsic(name) => create_intrinsic_element(&crate::document(), name, props, children).map(Child::from),
	}
}

/// Creates the element `tag` in `document`, appends `children` and then applies `props`.
///
/// Children go first so that properties like a `<select>`'s `value` can find their `<option>`s.
/// `key` is discarded and `ref` is resolved last, once the element is complete.
///
/// # Errors
///
/// Iff the DOM rejects the tag name, an insertion or a prop.
#[instrument(skip(document, props, children), fields(props = props.as_ref().map_or(0, Props::len), children = children.len()))]
pub fn create_intrinsic_element(document: &web_sys::Document, tag: &str, props: Option<Props>, children: Vec<Child>) -> Result<web_sys::Element, JsValue> {
	let element = match namespace::resolve(tag) {
		Some(resolved) => {
			let name = namespace::svg_spelling(tag).unwrap_or_else(|| namespace::creation_name(tag));
			document.create_element_ns(Some(resolved.uri()), name)?
		}
		None => document.create_element(namespace::creation_name(tag))?,
	};

	if props.as_ref().map_or(true, Props::is_empty) {
		match children.as_slice() {
			[] => return Ok(element),
			// An empty text content would leave no node behind, unlike appending.
			[Child::Text(text)] if !text.is_empty() => {
				element.set_text_content(Some(text.as_str()));
				return Ok(element);
			}
			_ => (),
		}
	}

	for child in children {
		append_child(&element, child)?;
	}

	if let Some(props) = props {
		let mut element_ref = None;
		for (name, value) in props {
			match name.as_str() {
				"key" => (),
				"ref" => element_ref = Some(value),
				_ => set_prop(&element, &name, &value)?,
			}
		}
		if let Some(element_ref) = element_ref {
			resolve_ref(&element, &element_ref)?;
		}
	}

	Ok(element)
}

fn resolve_ref(element: &web_sys::Element, value: &PropValue) -> Result<(), JsValue> {
	match value {
		PropValue::Ref(element_ref) => {
			element_ref.resolve(element);
			Ok(())
		}
		PropValue::Js(function) if function.is_function() => function.unchecked_ref::<Function>().call1(&JsValue::UNDEFINED, element).map(drop),
		PropValue::Js(holder) if holder.is_object() => Reflect::set(holder, &JsValue::from_str("current"), element).map(drop),
		value if value.is_nullish() => Ok(()),
		value => {
			warn!("`ref` value {:?} is neither callable nor a holder; Ignoring it.", value);
			Ok(())
		}
	}
}

/// The fragment factory.
///
/// A non-nullish `children` prop takes precedence over `children`. All other props are ignored.
///
/// # Errors
///
/// Iff the DOM rejects an insertion.
#[instrument(skip(props, children))]
pub fn create_fragment(props: Option<Props>, children: Vec<Child>) -> Result<web_sys::DocumentFragment, JsValue> {
	let fragment = crate::document().create_document_fragment();
	let children = match props.and_then(|mut props| props.remove("children")) {
		Some(from_props) if !from_props.is_nullish() => from_props.into_child().into_list(),
		_ => children,
	};
	for child in children {
		append_child(&fragment, child)?;
	}
	Ok(fragment)
}
