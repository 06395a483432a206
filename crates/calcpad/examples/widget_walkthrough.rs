//! Widget Walkthrough
//!
//! Scripts the widget host against the mock DOM: keypad clicks, keyboard
//! input, a division by zero and a theme toggle.
//!
//! Run with: cargo run -p calcpad --example widget_walkthrough

use calcpad::dom::{CURRENT_OPERAND_ID, PREVIOUS_OPERAND_ID};
use calcpad::prelude::*;

fn show(step: &str, driver: &WidgetDriver<MemoryStore>) {
    println!(
        "{step:<28} {:>12} | {:<8} [{}]",
        driver.previous_text(),
        driver.current_text(),
        driver.theme()
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut driver = WidgetDriver::new(MemoryStore::new());
    driver.init();
    show("init", &driver);

    for id in ["btn-2", "btn-add", "btn-3", "btn-multiply", "btn-4"] {
        driver.click(id);
    }
    show("click 2 + 3 × 4", &driver);
    driver.click("btn-equals");
    show("click =", &driver);

    driver.key_down("Escape");
    driver.type_keys(["0", ".", "1", "+", "0", ".", "2", "Enter"]);
    show("type 0.1 + 0.2 Enter", &driver);

    driver.type_keys(["/", "0", "="]);
    show("type / 0 =", &driver);
    driver.type_keys(["7"]);
    show("type 7 (ignored)", &driver);
    driver.key_down("Escape");
    show("Escape", &driver);

    driver.click("theme-toggle");
    show("toggle theme", &driver);

    println!();
    println!("DOM:");
    for id in [PREVIOUS_OPERAND_ID, CURRENT_OPERAND_ID] {
        println!("  #{id:<18} {:?}", driver.dom().get_element_text(id).unwrap_or_default());
    }
    println!("  body classes       {:?}", driver.dom().body.class_name());
    println!("  events recorded    {}", driver.dom().event_history().len());
}
