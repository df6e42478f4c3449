use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use quote::ToTokens;

#[path = "fixtures/inventory/mod.rs"]
mod inventory;

use inventory::catalog::util::Sku;
use inventory::pricing::util::Cents;
use inventory::{Item, Slot};

fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/inventory")
}

fn tokens(code: &str) -> String {
    syn::parse_file(code).unwrap().to_token_stream().to_string()
}

#[test]
fn test_public_accessors_round_trip() {
    let mut item = Item::default();
    item.SetSku(Sku("A-100".to_string()));
    item.SetPrice(Cents(1299));
    assert_eq!(item.GetSku(), Sku("A-100".to_string()));
    assert_eq!(item.GetPrice(), Cents(1299));

    item.SetPrice(Cents(999));
    item.SetPrice(Cents(999));
    assert_eq!(item.GetPrice(), Cents(999));
}

#[test]
fn test_custom_name_and_getter_only_fields() {
    let mut item = Item::default();
    item.rename("widget");
    item.tag("blue", 2);
    assert_eq!(item.GetTitle(), "widget");
    assert_eq!(item.GetTags(), BTreeMap::from([("blue".to_string(), 2)]));
    assert_eq!(item.notes(), "");
}

#[test]
fn test_module_private_accessors() {
    let mut item = Item::default();
    assert_eq!(inventory::restock(&mut item, 3), Duration::from_secs(3 * 86_400));
}

#[test]
fn test_generic_owner_accessors() {
    let mut slot = Slot::new(vec![1, 2], "primes");
    assert_eq!(slot.GetValue(), vec![1, 2]);
    slot.SetValue(vec![2, 3, 5]);
    assert_eq!(slot.GetValue(), vec![2, 3, 5]);
    assert_eq!(slot.label(), "primes");
}

#[test]
fn test_generated_file_matches_checked_in_copy() {
    let (output, code) = accessor_build::generate().target(fixture_dir()).render().unwrap();
    assert!(output.ends_with("fixtures/inventory/accessor.rs"));

    let golden = std::fs::read_to_string(fixture_dir().join("accessor.rs")).unwrap();
    assert_eq!(tokens(&code), tokens(&golden));
    assert!(code.starts_with(
        "// Code generated by accessor; DO NOT EDIT.\n\
         \n\
         #![allow(non_snake_case, unused_imports, clippy::clone_on_copy)]\n\
         \n\
         use super::*;\n\
         \n\
         use std::collections;\n\
         use std::time;\n\
         \n\
         use super::catalog::util;\n\
         use super::pricing::util as util1;\n"
    ));
}

#[test]
fn test_generation_is_deterministic() {
    let generator = accessor_build::generate().target(fixture_dir());
    let (_, first) = generator.render().unwrap();
    let (_, second) = generator.render().unwrap();
    assert_eq!(first, second);
}
