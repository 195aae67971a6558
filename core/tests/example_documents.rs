use pretty_assertions::assert_eq;
use serde_json::json;
use wsdoc_core::example::ContainerKind;
use wsdoc_core::model::FacetFilter;
use wsdoc_core::{ExampleBuilder, ExampleSlot, QName, TypeRegistry, XmlDocument, XmlElement};

const SHOP: &str = r#"
types:
  - qualifiedName: com.example.shop.Entity
    namespace: urn:shop
    attributes:
      - name: version
        namespace: urn:audit
        example: { value: "3" }
  - qualifiedName: com.example.shop.Order
    namespace: urn:shop
    baseType: { complex: com.example.shop.Entity }
    element: { name: purchaseOrder, namespace: urn:shop }
    attributes:
      - name: id
        example: { value: "A-1", value2: "B-2" }
      - name: channel
        facets: [internal]
    elements:
      - name: customer
        namespace: urn:shop
        type: { complex: com.example.shop.Customer }
      - name: line
        namespace: urn:shop
        type: { complex: com.example.shop.Line }
        wrapper: { name: lines, namespace: urn:shop }
    anyElement: {}
  - qualifiedName: com.example.shop.Customer
    namespace: urn:shop
    elements:
      - name: name
        namespace: urn:shop
        example: { tag: "Ada Lovelace" }
      - name: referrer
        namespace: urn:shop
        type: { complex: com.example.shop.Customer }
  - qualifiedName: com.example.shop.Line
    namespace: urn:shop
    elements:
      - name: sku
        namespace: urn:shop
        example: { value: "SKU-9" }
      - name: order
        namespace: urn:shop
        type: { complex: com.example.shop.Order }
"#;

fn registry() -> TypeRegistry {
    TypeRegistry::from_yaml_str(SHOP).unwrap()
}

fn depth(element: &XmlElement) -> usize {
    1 + element.child_elements().map(depth).max().unwrap_or(0)
}

#[test]
fn test_cyclic_order_document_is_bounded_and_well_formed() {
    let registry = registry();
    let order = registry.get("com.example.shop.Order").unwrap();
    let builder = ExampleBuilder::new(&registry);
    let doc = builder.build_example(order, &[]).unwrap();

    assert_eq!(doc.root.name, QName::new(Some("urn:shop"), "purchaseOrder"));
    assert_eq!(doc.root.attribute("id"), Some("A-1"));
    assert_eq!(doc.root.attribute("version"), Some("3"));

    let names: Vec<&str> = doc.root.child_elements().map(|c| c.name.local.as_str()).collect();
    assert_eq!(names, vec!["customer", "lines", "extension1", "extension2"]);

    // Namespace-less attributes leave the open-content placeholders unqualified.
    assert_eq!(doc.root.child("extension1").unwrap().name.namespace(), None);

    let customer = doc.root.child("customer").unwrap();
    assert_eq!(customer.child("name").unwrap().text(), "Ada Lovelace");
    // Customer -> referrer re-enters Customer, so the referrer stays empty.
    assert!(customer.child("referrer").unwrap().children.is_empty());

    // Line -> order re-enters Order.
    let line = doc.root.child("lines").unwrap().child("line").unwrap();
    assert_eq!(line.child("sku").unwrap().text(), "SKU-9");
    assert!(line.child("order").unwrap().children.is_empty());
    assert!(depth(&doc.root) <= 4);

    let xml = doc.to_xml_string().unwrap();
    assert!(xml.starts_with("<purchaseOrder xmlns=\"urn:shop\""));
    assert!(xml.contains("xmlns:ns0=\"urn:audit\""));
    assert_eq!(XmlDocument::parse(&xml).unwrap(), doc);
}

#[test]
fn test_alternate_slot_and_facets() {
    let registry = registry();
    let order = registry.get("com.example.shop.Order").unwrap();

    let doc = ExampleBuilder::new(&registry)
        .with_slot(ExampleSlot::Alternate)
        .build_example(order, &[])
        .unwrap();
    assert_eq!(doc.root.attribute("id"), Some("B-2"));
    assert_eq!(doc.root.attribute("channel"), Some("..."));

    let hidden = ExampleBuilder::new(&registry)
        .with_facet_filter(FacetFilter::new().exclude("internal"))
        .build_example(order, &[])
        .unwrap();
    assert_eq!(hidden.root.attribute("channel"), None);
}

#[test]
fn test_containers_wrap_outwards() {
    let registry = registry();
    let customer = registry.get("com.example.shop.Customer").unwrap();
    let doc = ExampleBuilder::new(&registry)
        .build_example(customer, &[ContainerKind::List, ContainerKind::Map])
        .unwrap();
    assert_eq!(doc.root.name, QName::local("map"));
    let list = doc.root.child("list").unwrap();
    assert_eq!(list.child("customer").unwrap().name.namespace(), Some("urn:shop"));
}

#[test]
fn test_json_rendition() {
    let registry = registry();
    let customer = registry.get("com.example.shop.Customer").unwrap();
    let value = ExampleBuilder::new(&registry)
        .build_json_example(customer, &[ContainerKind::Array])
        .unwrap();
    assert_eq!(value, json!([{ "name": "Ada Lovelace", "referrer": {} }]));
}
