//! Children, props and refs as passed to the factories.

use core::fmt::{self, Debug, Formatter};
use std::{cell::RefCell, rc::Rc};
use tracing::warn;
use wasm_bindgen::{JsCast, JsValue};

/// A children value.
///
/// [`Child::Null`] and [`Child::Bool`] render nothing at any depth, so `cond.then(|| …)` and `Option`s can be passed as-is.
#[derive(Debug, Clone)]
pub enum Child {
	Null,
	Bool(bool),
	Number(f64),
	Text(String),
	Node(web_sys::Node),
	List(Vec<Child>),
}

impl Default for Child {
	fn default() -> Self {
		Child::Null
	}
}

impl Child {
	/// Wraps anything that isn't already a [`Child::List`] into a one-element list.
	#[must_use]
	pub fn into_list(self) -> Vec<Child> {
		match self {
			Child::List(children) => children,
			single => vec![single],
		}
	}
}

impl From<()> for Child {
	fn from((): ()) -> Self {
		Child::Null
	}
}

impl From<bool> for Child {
	fn from(value: bool) -> Self {
		Child::Bool(value)
	}
}

impl From<&str> for Child {
	fn from(text: &str) -> Self {
		Child::Text(text.to_owned())
	}
}

impl From<String> for Child {
	fn from(text: String) -> Self {
		Child::Text(text)
	}
}

impl<T: Into<Child>> From<Option<T>> for Child {
	fn from(value: Option<T>) -> Self {
		value.map_or(Child::Null, Into::into)
	}
}

impl<T: Into<Child>> From<Vec<T>> for Child {
	fn from(children: Vec<T>) -> Self {
		Child::List(children.into_iter().map(Into::into).collect())
	}
}

macro_rules! number_conversions {
	($target:ident::$variant:ident: $($number:ty),*$(,)?) => {$(
		impl From<$number> for $target {
			fn from(value: $number) -> Self {
				$target::$variant(value.into())
			}
		}
	)*};
}
number_conversions!(Child::Number: f64, f32, i32, u32, i16, u16, i8, u8);

macro_rules! node_conversions {
	($($node:ty),*$(,)?) => {$(
		impl From<$node> for Child {
			fn from(node: $node) -> Self {
				Child::Node(node.into())
			}
		}
	)*};
}
node_conversions!(
	web_sys::Node,
	web_sys::Element,
	web_sys::HtmlElement,
	web_sys::SvgElement,
	web_sys::DocumentFragment,
	web_sys::Text,
	web_sys::Comment,
);

/// Formats `number` the way JavaScript's `Number.prototype.toString()` does.
#[must_use]
pub fn number_to_string(number: f64) -> String {
	if number.is_nan() {
		"NaN".to_owned()
	} else if number.is_infinite() {
		(if number > 0. { "Infinity" } else { "-Infinity" }).to_owned()
	} else if number == 0. {
		// Also covers `-0`.
		"0".to_owned()
	} else if number.abs() >= 1e21 || number.abs() < 1e-6 {
		let exponential = format!("{:e}", number);
		match exponential.find("e-") {
			Some(_) => exponential,
			None => exponential.replacen('e', "e+", 1),
		}
	} else {
		number.to_string()
	}
}

/// A style property value. Numbers are treated as pixel lengths.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
	Number(f64),
	Str(String),
}

impl From<&str> for StyleValue {
	fn from(value: &str) -> Self {
		StyleValue::Str(value.to_owned())
	}
}

impl From<String> for StyleValue {
	fn from(value: String) -> Self {
		StyleValue::Str(value)
	}
}

number_conversions!(StyleValue::Number: f64, f32, i32, u32, i16, u16, i8, u8);

/// An insertion-ordered style mapping, serialized into a `style` attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style(Vec<(String, StyleValue)>);

impl Style {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn with(mut self, key: impl Into<String>, value: impl Into<StyleValue>) -> Self {
		self.0.push((key.into(), value.into()));
		self
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
		self.0.iter().map(|(key, value)| (key.as_str(), value))
	}

	/// Reads a host style object's own enumerable entries, in the host's property order.
	///
	/// Numbers stay numbers (and receive `px` on serialization), nullish entries are skipped
	/// and any other value is used in its string form.
	#[must_use]
	pub fn from_js_object(object: &js_sys::Object) -> Self {
		Self(
			js_sys::Object::entries(object)
				.iter()
				.filter_map(|entry| {
					let entry: js_sys::Array = entry.unchecked_into();
					let key = entry.get(0).as_string()?;
					let value = entry.get(1);
					let value = match (value.as_f64(), value.as_string()) {
						_ if value.is_null() || value.is_undefined() => return None,
						(Some(number), _) => StyleValue::Number(number),
						(None, Some(string)) => StyleValue::Str(string),
						(None, None) => StyleValue::Str(value.unchecked_ref::<js_sys::Object>().to_string().into()),
					};
					Some((key, value))
				})
				.collect(),
		)
	}
}

/// Storage for the element a [`Ref::Holder`] receives.
#[derive(Debug, Clone, Default)]
pub struct RefHolder(Rc<RefCell<Option<web_sys::Element>>>);

impl RefHolder {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn current(&self) -> Option<web_sys::Element> {
		self.0.borrow().clone()
	}

	pub fn set_current(&self, element: Option<web_sys::Element>) {
		*self.0.borrow_mut() = element;
	}
}

/// A handle on a created element, passed through the reserved `ref` prop.
#[derive(Clone)]
pub enum Ref {
	Callback(Rc<dyn Fn(&web_sys::Element)>),
	Holder(RefHolder),
}

impl Ref {
	pub fn callback(callback: impl 'static + Fn(&web_sys::Element)) -> Self {
		Ref::Callback(Rc::new(callback))
	}

	pub fn resolve(&self, element: &web_sys::Element) {
		match self {
			Ref::Callback(callback) => callback(element),
			Ref::Holder(holder) => holder.set_current(Some(element.clone())),
		}
	}
}

impl Debug for Ref {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Ref::Callback(_) => f.write_str("Ref::Callback(..)"),
			Ref::Holder(holder) => f.debug_tuple("Ref::Holder").field(holder).finish(),
		}
	}
}

impl From<RefHolder> for Ref {
	fn from(holder: RefHolder) -> Self {
		Ref::Holder(holder)
	}
}

impl From<&RefHolder> for Ref {
	fn from(holder: &RefHolder) -> Self {
		Ref::Holder(holder.clone())
	}
}

/// A single prop value.
#[derive(Clone)]
pub enum PropValue {
	Null,
	Bool(bool),
	Number(f64),
	Str(String),
	Listener(Rc<dyn Fn(web_sys::Event)>),
	Style(Style),
	Ref(Ref),
	Children(Child),
	/// Any host value. `null` and `undefined` count as nullish; Functions are callable as listeners and refs.
	Js(JsValue),
}

impl PropValue {
	pub fn listener(listener: impl 'static + Fn(web_sys::Event)) -> Self {
		PropValue::Listener(Rc::new(listener))
	}

	#[must_use]
	pub fn is_nullish(&self) -> bool {
		match self {
			PropValue::Null => true,
			PropValue::Js(value) => value.is_null() || value.is_undefined(),
			_ => false,
		}
	}

	/// Whether this is `false`, either from Rust or from the host.
	#[must_use]
	pub fn is_false(&self) -> bool {
		match self {
			PropValue::Bool(value) => !value,
			PropValue::Js(value) => value.as_bool() == Some(false),
			_ => false,
		}
	}

	/// The attribute text for this value, or [`None`] if it is nullish or has no string form.
	#[must_use]
	pub fn to_attribute_value(&self) -> Option<String> {
		match self {
			PropValue::Null => None,
			PropValue::Bool(value) => Some(value.to_string()),
			PropValue::Number(value) => Some(number_to_string(*value)),
			PropValue::Str(value) => Some(value.clone()),
			PropValue::Style(style) => Some(crate::props::style_declarations(style)),
			PropValue::Js(value) if value.is_null() || value.is_undefined() => None,
			PropValue::Js(value) => Some(match value.as_string() {
				Some(string) => string,
				None => value.unchecked_ref::<js_sys::Object>().to_string().into(),
			}),
			PropValue::Listener(_) | PropValue::Ref(_) | PropValue::Children(_) => {
				warn!("Prop value {:?} has no string form; Skipping it.", self);
				None
			}
		}
	}

	/// Interprets this value as children, as a `children` prop is read.
	#[must_use]
	pub fn into_child(self) -> Child {
		match self {
			PropValue::Null => Child::Null,
			PropValue::Bool(value) => Child::Bool(value),
			PropValue::Number(value) => Child::Number(value),
			PropValue::Str(value) => Child::Text(value),
			PropValue::Children(children) => children,
			PropValue::Js(value) => js_child(value),
			PropValue::Listener(_) | PropValue::Style(_) | PropValue::Ref(_) => {
				warn!("Prop value {:?} can't be rendered as children; Skipping it.", self);
				Child::Null
			}
		}
	}

	/// Converts this value for assignment to a live DOM property.
	#[must_use]
	pub fn to_js(&self) -> JsValue {
		match self {
			PropValue::Null => JsValue::NULL,
			PropValue::Bool(value) => JsValue::from_bool(*value),
			PropValue::Number(value) => JsValue::from_f64(*value),
			PropValue::Str(value) => JsValue::from_str(value),
			PropValue::Style(style) => JsValue::from_str(&crate::props::style_declarations(style)),
			PropValue::Js(value) => value.clone(),
			PropValue::Children(Child::Node(node)) => node.clone().into(),
			PropValue::Children(Child::Text(text)) => JsValue::from_str(text),
			PropValue::Children(Child::Number(number)) => JsValue::from_f64(*number),
			PropValue::Listener(_) | PropValue::Ref(_) | PropValue::Children(_) => JsValue::UNDEFINED,
		}
	}
}

fn js_child(value: JsValue) -> Child {
	if value.is_null() || value.is_undefined() {
		return Child::Null;
	}
	if let Some(value) = value.as_bool() {
		return Child::Bool(value);
	}
	if let Some(text) = value.as_string() {
		return Child::Text(text);
	}
	if let Some(number) = value.as_f64() {
		return Child::Number(number);
	}
	if js_sys::Array::is_array(&value) {
		return Child::List(value.unchecked_into::<js_sys::Array>().iter().map(js_child).collect());
	}
	match value.dyn_into::<web_sys::Node>() {
		Ok(node) => Child::Node(node),
		Err(value) => {
			warn!("Host value {:?} can't be rendered as children; Skipping it.", value);
			Child::Null
		}
	}
}

impl Debug for PropValue {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			PropValue::Null => f.write_str("Null"),
			PropValue::Bool(value) => f.debug_tuple("Bool").field(value).finish(),
			PropValue::Number(value) => f.debug_tuple("Number").field(value).finish(),
			PropValue::Str(value) => f.debug_tuple("Str").field(value).finish(),
			PropValue::Listener(_) => f.write_str("Listener(..)"),
			PropValue::Style(style) => f.debug_tuple("Style").field(style).finish(),
			PropValue::Ref(r#ref) => f.debug_tuple("Ref").field(r#ref).finish(),
			PropValue::Children(children) => f.debug_tuple("Children").field(children).finish(),
			PropValue::Js(value) => f.debug_tuple("Js").field(value).finish(),
		}
	}
}

impl From<bool> for PropValue {
	fn from(value: bool) -> Self {
		PropValue::Bool(value)
	}
}

impl From<&str> for PropValue {
	fn from(value: &str) -> Self {
		PropValue::Str(value.to_owned())
	}
}

impl From<String> for PropValue {
	fn from(value: String) -> Self {
		PropValue::Str(value)
	}
}

number_conversions!(PropValue::Number: f64, f32, i32, u32, i16, u16, i8, u8);

impl From<Style> for PropValue {
	fn from(style: Style) -> Self {
		PropValue::Style(style)
	}
}

impl From<Ref> for PropValue {
	fn from(r#ref: Ref) -> Self {
		PropValue::Ref(r#ref)
	}
}

impl From<RefHolder> for PropValue {
	fn from(holder: RefHolder) -> Self {
		PropValue::Ref(holder.into())
	}
}

impl From<&RefHolder> for PropValue {
	fn from(holder: &RefHolder) -> Self {
		PropValue::Ref(holder.into())
	}
}

impl From<Child> for PropValue {
	fn from(children: Child) -> Self {
		PropValue::Children(children)
	}
}

impl From<JsValue> for PropValue {
	fn from(value: JsValue) -> Self {
		PropValue::Js(value)
	}
}

impl<T: Into<PropValue>> From<Option<T>> for PropValue {
	fn from(value: Option<T>) -> Self {
		value.map_or(PropValue::Null, Into::into)
	}
}

/// An insertion-ordered props bag.
///
/// [`Props::insert`] replaces existing entries in place, like an object spread would.
#[derive(Debug, Clone, Default)]
pub struct Props(Vec<(String, PropValue)>);

impl Props {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn with(mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Self {
		self.insert(name, value);
		self
	}

	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<PropValue>) {
		let name = name.into();
		let value = value.into();
		match self.0.iter_mut().find(|(existing, _)| *existing == name) {
			Some((_, slot)) => *slot = value,
			None => self.0.push((name, value)),
		}
	}

	#[must_use]
	pub fn get(&self, name: &str) -> Option<&PropValue> {
		self.0.iter().find(|(existing, _)| existing == name).map(|(_, value)| value)
	}

	pub fn remove(&mut self, name: &str) -> Option<PropValue> {
		let index = self.0.iter().position(|(existing, _)| existing == name)?;
		Some(self.0.remove(index).1)
	}

	/// The `children` entry, as components read it.
	#[must_use]
	pub fn children(&self) -> Option<&Child> {
		match self.get("children")? {
			PropValue::Children(children) => Some(children),
			_ => None,
		}
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
		self.0.iter().map(|(name, value)| (name.as_str(), value))
	}
}

impl IntoIterator for Props {
	type Item = (String, PropValue);
	type IntoIter = std::vec::IntoIter<(String, PropValue)>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn numbers_format_like_javascript() {
		assert_eq!(number_to_string(-10.), "-10");
		assert_eq!(number_to_string(123.45), "123.45");
		assert_eq!(number_to_string(0.5), "0.5");
		assert_eq!(number_to_string(-0.), "0");
		assert_eq!(number_to_string(f64::NAN), "NaN");
		assert_eq!(number_to_string(f64::INFINITY), "Infinity");
		assert_eq!(number_to_string(f64::NEG_INFINITY), "-Infinity");
		assert_eq!(number_to_string(1e21), "1e+21");
		assert_eq!(number_to_string(1.5e-7), "1.5e-7");
		assert_eq!(number_to_string(100.), "100");
	}

	#[test]
	fn insert_replaces_in_place() {
		let mut props = Props::new().with("id", "a").with("class", "b");
		props.insert("id", "c");
		let names: Vec<_> = props.iter().map(|(name, _)| name.to_owned()).collect();
		assert_eq!(names, ["id", "class"]);
		assert_eq!(props.get("id").and_then(PropValue::to_attribute_value).as_deref(), Some("c"));
	}

	#[test]
	fn nullish_values() {
		assert!(PropValue::Null.is_nullish());
		assert!(PropValue::from(None::<&str>).is_nullish());
		assert!(!PropValue::Bool(false).is_nullish());
		assert!(!PropValue::Number(0.).is_nullish());
	}

	#[test]
	fn only_false_is_false() {
		assert!(PropValue::Bool(false).is_false());
		assert!(!PropValue::Bool(true).is_false());
		assert!(!PropValue::Null.is_false());
		assert!(!PropValue::Number(0.).is_false());
		assert!(!PropValue::from("").is_false());
	}

	#[test]
	fn scalar_attribute_values() {
		assert_eq!(PropValue::from(42).to_attribute_value().as_deref(), Some("42"));
		assert_eq!(PropValue::from(f64::NAN).to_attribute_value().as_deref(), Some("NaN"));
		assert_eq!(PropValue::from(true).to_attribute_value().as_deref(), Some("true"));
		assert_eq!(PropValue::Null.to_attribute_value(), None);
	}

	#[test]
	fn children_conversions() {
		assert!(matches!(Child::from(None::<&str>), Child::Null));
		assert!(matches!(Child::from(()), Child::Null));
		match Child::from(vec![1_i32, 2]) {
			Child::List(children) => assert_eq!(children.len(), 2),
			other => panic!("Expected a list but found {:?}", other),
		}
		assert_eq!(Child::from("a").into_list().len(), 1);
		assert_eq!(Child::from(vec!["a", "b", "c"]).into_list().len(), 3);
	}
}
