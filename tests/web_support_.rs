#![allow(dead_code)]

use dom_pragma::Child;
use std::sync::Once;
use wasm_bindgen::JsCast;
use web_sys::{window, Document, Element};

pub fn init_log() {
	static INIT: Once = Once::new();
	//TODO: Fail on Warning or Error.
	INIT.call_once(tracing_wasm::set_as_global_default);
}

pub fn document() -> Document {
	window().unwrap().document().unwrap()
}

pub fn into_element(child: Child) -> Element {
	match child {
		Child::Node(node) => node.dyn_into().expect("Expected an element."),
		other => panic!("Expected an element but found {:?}", other),
	}
}

pub fn element_children(element: &Element) -> Vec<Element> {
	let children = element.children();
	(0..children.length()).map(|i| children.item(i).unwrap()).collect()
}
