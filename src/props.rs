//! Applying a single prop to an element.
//!
//! The rules are checked in order and the first match wins:
//!
//! 1. `key` and `ref` are reserved and ignored here.
//! 2. `on*` with a callable value registers an event listener.
//! 3. `style` with a [`Style`] mapping or a host object is serialized into the `style` attribute.
//! 4. [Boolean attributes](`BOOLEAN_ATTRIBUTES`) are toggled by presence.
//! 5. [DOM properties](`DOM_PROPERTIES`) are assigned to the live element.
//! 6. Anything else that isn't nullish becomes an attribute.

use crate::value::{number_to_string, PropValue, Style, StyleValue};
use js_sys::Reflect;
use tracing::{instrument, level_filters::STATIC_MAX_LEVEL, trace, warn, Level};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};

/// Attributes whose presence, not value, carries meaning.
pub const BOOLEAN_ATTRIBUTES: &[&str] = &[
	"disabled",
	"readonly",
	"required",
	"autofocus",
	"autoplay",
	"controls",
	"loop",
	"multiple",
	"open",
	"hidden",
	"reversed",
	"allowfullscreen",
	"default",
	"ismap",
	"novalidate",
	"formnovalidate",
	"defer",
	"async",
];

/// Names assigned as live properties, so that the DOM's own coercion and side effects apply.
pub const DOM_PROPERTIES: &[&str] = &[
	"value",
	"checked",
	"selected",
	"indeterminate",
	"muted",
	"volume",
	"currentTime",
	"playbackRate",
	"innerHTML",
	"textContent",
	"innerText",
];

/// Applies one prop to `element`.
///
/// # Errors
///
/// Iff the DOM rejects the mutation, for example because `name` isn't a valid attribute name.
#[instrument(skip(element, value))]
pub fn set_prop(element: &web_sys::Element, name: &str, value: &PropValue) -> Result<(), JsValue> {
	if cfg!(feature = "dangerous-logging") {
		trace!(?value);
	}

	match (name, value) {
		("key" | "ref", _) => Ok(()),

		(_, PropValue::Listener(listener)) if name.starts_with("on") => {
			let listener = listener.clone();
			let closure = Closure::wrap(Box::new(move |event: web_sys::Event| listener(event)) as Box<dyn Fn(web_sys::Event)>);
			add_event_listener(element, name, &closure.into_js_value())
		}
		(_, PropValue::Js(function)) if name.starts_with("on") && function.is_function() => add_event_listener(element, name, function),

		("style", PropValue::Style(style)) => element.set_attribute("style", &style_declarations(style)),
		("style", PropValue::Js(object)) if object.is_object() && !object.is_function() => {
			element.set_attribute("style", &style_declarations(&Style::from_js_object(object.unchecked_ref())))
		}

		_ if BOOLEAN_ATTRIBUTES.contains(&name) => {
			if value.is_false() || value.is_nullish() {
				element.remove_attribute(name)
			} else {
				element.set_attribute(name, "")
			}
		}

		_ if DOM_PROPERTIES.contains(&name) => {
			if !Reflect::set(element, &JsValue::from_str(name), &value.to_js())? {
				warn!("Could not assign property {:?}.", name);
			}
			Ok(())
		}

		_ => match value.to_attribute_value() {
			Some(attribute_value) => element.set_attribute(name, &attribute_value),
			None => Ok(()),
		},
	}
}

/// `onMouseOver` listens for `mouseover`.
fn add_event_listener(element: &web_sys::Element, name: &str, listener: &JsValue) -> Result<(), JsValue> {
	let event_type = name[2..].to_lowercase();
	trace!("Adding {:?} listener.", event_type);
	element.add_event_listener_with_callback(&event_type, listener.unchecked_ref())
}

/// Serializes `style` into CSS declarations, `"key: value; key: value"`, in insertion order.
///
/// Numbers are suffixed with `px`. Keys are expected in kebab-case and are used literally:
/// A key containing an uppercase letter is applied as-is, with a warning.
#[must_use]
pub fn style_declarations(style: &Style) -> String {
	let mut declarations = String::new();
	for (key, value) in style.iter() {
		if STATIC_MAX_LEVEL >= Level::WARN && key.chars().any(char::is_uppercase) {
			warn!(
				"Style key {:?} contains uppercase letters. Use the kebab-case spelling {:?} instead; The key is applied as given.",
				key,
				kebab_case(key)
			);
		}

		if !declarations.is_empty() {
			declarations.push_str("; ");
		}
		declarations.push_str(key);
		declarations.push_str(": ");
		match value {
			StyleValue::Number(number) => {
				declarations.push_str(&number_to_string(*number));
				declarations.push_str("px");
			}
			StyleValue::Str(string) => declarations.push_str(string),
		}
	}
	declarations
}

fn kebab_case(key: &str) -> String {
	let mut kebab = String::with_capacity(key.len() + 4);
	for c in key.chars() {
		if c.is_uppercase() {
			kebab.push('-');
			kebab.extend(c.to_lowercase());
		} else {
			kebab.push(c);
		}
	}
	kebab
}
