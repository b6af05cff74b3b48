//! End-to-end tests for `storefront checkout` commands.

mod fixtures;
use fixtures::*;

#[test]
fn test_checkout_show_empty_cart() {
    let env = TestEnv::new();

    let stdout = env.run_ok(&["checkout", "show"]);
    assert!(stdout.contains("Your cart is empty."));
    assert!(stdout.contains("Total: $0.00"));
    assert!(stdout.contains("Segment: Cart empty"));
}

#[test]
fn test_checkout_show_json_contract() {
    let env = TestEnv::new();
    env.seed_cart(vec![
        line_item("wine-1", "Cabernet Reserva", 29.9, "wines", 2),
        line_item("fish-1", "Salmon Fillet", 12.5, "fish", 1),
    ]);

    let stdout = env.run_ok(&["checkout", "show", "--json"]);
    let view: serde_json::Value = serde_json::from_str(&stdout).expect("Should parse JSON");

    assert_eq!(view["items"].as_array().unwrap().len(), 2);
    assert!((view["total"].as_f64().unwrap() - 72.3).abs() < 1e-9);
    assert!(view["segment"]["cluster"].is_number());
    assert!(view.get("segment_error").is_none());
}

#[test]
fn test_checkout_show_json_segment_error_on_empty() {
    let env = TestEnv::new();

    let stdout = env.run_ok(&["checkout", "show", "--json"]);
    let view: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    assert!(view.get("segment").is_none());
    assert_eq!(view["segment_error"], "Cart empty");
}

#[test]
fn test_confirm_empty_cart_fails() {
    let env = TestEnv::new();

    let output = env.run(&["checkout", "confirm"]);
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("empty cart"));
}

#[test]
fn test_confirm_writes_receipt_and_clears_cart() {
    let env = TestEnv::new();
    env.run_ok(&["cart", "add", "--category", "wines", "--id", "wine-1"]);
    env.run_ok(&["cart", "add", "--category", "wines", "--id", "wine-1"]);

    let stdout = env.run_ok(&["checkout", "confirm"]);
    assert!(stdout.contains("Order confirmed!"));
    assert!(stdout.contains("Total:    $59.80"));

    // Exactly one receipt exists
    let receipts = dir_entries(&env.orders_dir());
    assert_eq!(receipts.len(), 1);

    let receipt: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&receipts[0]).unwrap()).unwrap();
    assert_eq!(receipt["items"].as_array().unwrap().len(), 1);
    assert_eq!(receipt["items"][0]["qty"], 2);
    assert!((receipt["total"].as_f64().unwrap() - 59.8).abs() < 1e-9);
    assert!(receipt["id"].is_string());
    assert!(receipt["created"].is_string());

    // Cart was cleared
    let stdout = env.run_ok(&["cart", "show"]);
    assert!(stdout.contains("Cart is empty."));
}

#[test]
fn test_confirm_json_outputs_order() {
    let env = TestEnv::new();
    env.seed_cart(vec![line_item("gold-5", "Rainbow Ring", 450.0, "gold", 1)]);

    let stdout = env.run_ok(&["checkout", "confirm", "--json"]);
    let order: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    assert!((order["total"].as_f64().unwrap() - 450.0).abs() < 1e-9);
    assert_eq!(order["items"][0]["id"], "gold-5");
}

#[test]
fn test_each_confirm_gets_its_own_receipt() {
    let env = TestEnv::new();

    env.seed_cart(vec![line_item("fish-1", "Salmon Fillet", 12.5, "fish", 1)]);
    env.run_ok(&["checkout", "confirm"]);

    env.seed_cart(vec![line_item("meat-2", "Chicken Breast", 6.9, "meat", 1)]);
    env.run_ok(&["checkout", "confirm"]);

    assert_eq!(dir_entries(&env.orders_dir()).len(), 2);
}
