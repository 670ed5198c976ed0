//! End-to-end serialization tests.
//!
//! These drive the public surface: build a document, render it to JSON or
//! XML at a chosen schema version, and check the wire output and the state
//! of the caller's object graph afterwards.

use cyclonedx_render::{
    serialize_bom, Bom, BomSerializer, Component, ComponentType, Error, ExternalRefType,
    ExternalReference, JsonSerializer, LicenseChoice, Licensing, Metadata, OutputFormat,
    SchemaVersion, XmlSerializer,
};

fn named(name: &str) -> Component {
    Component::new(ComponentType::Library, name).with_bom_ref_value(name)
}

// ============================================================================
// Empty documents
// ============================================================================

#[test]
fn empty_bom_renders_to_minimal_xml() {
    let mut bom = Bom::new();
    bom.version = 0;

    let out = serialize_bom(&bom, OutputFormat::Xml, SchemaVersion::V1_4, false)
        .expect("empty BOM renders");
    assert_eq!(
        out,
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <bom xmlns=\"http://cyclonedx.org/schema/bom/1.4\" version=\"0\"><components/></bom>"
    );
}

#[test]
fn empty_bom_renders_to_minimal_json_with_schema_id() {
    let mut bom = Bom::new();
    bom.version = 0;

    let out = serialize_bom(&bom, OutputFormat::Json, SchemaVersion::V1_4, false)
        .expect("empty BOM renders");
    assert_eq!(
        out,
        "{\"$schema\":\"http://cyclonedx.org/schema/bom-1.4.schema.json\",\
         \"bomFormat\":\"CycloneDX\",\"specVersion\":\"1.4\",\"version\":0,\"components\":[]}"
    );
}

#[test]
fn serial_number_appears_in_both_formats() {
    let mut bom = Bom::new();
    bom.serial_number = Some(
        "urn:uuid:12345678-1234-1234-1234-123456789012"
            .parse()
            .expect("valid serial number"),
    );

    let json = serialize_bom(&bom, OutputFormat::Json, SchemaVersion::V1_4, false).expect("json");
    assert!(json.contains("\"serialNumber\":\"urn:uuid:12345678-1234-1234-1234-123456789012\""));

    let xml = serialize_bom(&bom, OutputFormat::Xml, SchemaVersion::V1_4, false).expect("xml");
    assert!(xml.contains("serialNumber=\"urn:uuid:12345678-1234-1234-1234-123456789012\""));
}

// ============================================================================
// Format and capability gating
// ============================================================================

#[test]
fn json_for_1_1_fails_at_construction() {
    let err = JsonSerializer::new(SchemaVersion::V1_1).expect_err("1.1 has no JSON binding");
    assert!(matches!(
        err,
        Error::UnsupportedFormat {
            version: SchemaVersion::V1_1,
            format: OutputFormat::Json,
        }
    ));
    assert!(err.to_string().contains("1.1"), "{err}");

    let bom = Bom::new();
    let err = serialize_bom(&bom, OutputFormat::Json, SchemaVersion::V1_1, false)
        .expect_err("entry point rejects it too");
    assert!(matches!(err, Error::UnsupportedFormat { .. }));
}

#[test]
fn unsupported_component_type_aborts_serialization() {
    let mut bom = Bom::new();
    bom.add_component(
        Component::new(ComponentType::Container, "alpine")
            .with_version("3.20")
            .with_bom_ref_value("alpine"),
    );

    let err = serialize_bom(&bom, OutputFormat::Xml, SchemaVersion::V1_1, false)
        .expect_err("container is not expressible at 1.1");
    assert!(matches!(err, Error::UnsupportedComponentType { .. }));
    let msg = err.to_string();
    assert!(msg.contains("container") && msg.contains("alpine"), "{msg}");
}

#[test]
fn metadata_is_dropped_below_1_2() {
    let mut bom = Bom::new();
    let mut metadata = Metadata::new();
    metadata.component = Some(named("root-app"));
    bom.metadata = Some(metadata);

    let old = serialize_bom(&bom, OutputFormat::Xml, SchemaVersion::V1_1, false).expect("renders");
    assert!(!old.contains("<metadata>"), "{old}");
    assert!(!old.contains("root-app"), "{old}");

    let new = serialize_bom(&bom, OutputFormat::Xml, SchemaVersion::V1_2, false).expect("renders");
    assert!(new.contains("<metadata>"), "{new}");
    assert!(new.contains("<timestamp>"), "{new}");
    assert!(new.contains("root-app"), "{new}");
}

// ============================================================================
// Dependency graph flattening
// ============================================================================

#[test]
fn dependency_graph_is_flattened_and_filtered() {
    // R (metadata root) depends on A and B; A depends on C, which is not a
    // member of the document.
    let outsider = named("C");

    let mut a = named("A");
    a.add_dependency(outsider.bom_ref());
    let b = named("B");

    let mut root = named("R");
    root.add_dependency(a.bom_ref());
    root.add_dependency(b.bom_ref());

    let mut bom = Bom::new();
    bom.add_component(a);
    bom.add_component(b);
    let mut metadata = Metadata::new();
    metadata.component = Some(root);
    bom.metadata = Some(metadata);

    let out = serialize_bom(&bom, OutputFormat::Json, SchemaVersion::V1_4, false).expect("renders");
    let doc: serde_json::Value = serde_json::from_str(&out).expect("valid JSON");

    let dependencies = doc["dependencies"].as_array().expect("dependencies present");
    let entry = |r: &str| {
        dependencies
            .iter()
            .find(|e| e["ref"] == r)
            .unwrap_or_else(|| panic!("entry for {r} in {dependencies:?}"))
    };

    assert_eq!(entry("R")["dependsOn"], serde_json::json!(["A", "B"]));
    assert_eq!(entry("A")["dependsOn"], serde_json::json!([]), "C dropped");
    assert!(
        dependencies.iter().all(|e| e["ref"] != "C"),
        "no entry may reference the outsider"
    );
    assert!(
        dependencies
            .iter()
            .all(|e| !e["dependsOn"].as_array().expect("array").contains(&serde_json::json!("C"))),
        "the outsider never appears as a target"
    );
}

#[test]
fn dependencies_are_omitted_below_1_2() {
    let mut a = named("A");
    let b = named("B");
    a.add_dependency(b.bom_ref());

    let mut bom = Bom::new();
    bom.add_component(a);
    bom.add_component(b);

    let out = serialize_bom(&bom, OutputFormat::Xml, SchemaVersion::V1_1, false).expect("renders");
    assert!(!out.contains("<dependencies>"), "{out}");

    let out = serialize_bom(&bom, OutputFormat::Xml, SchemaVersion::V1_2, false).expect("renders");
    assert!(
        out.contains(r#"<dependency ref="A"><dependency ref="B"/></dependency>"#),
        "{out}"
    );
}

// ============================================================================
// Discrimination and restoration around serialize()
// ============================================================================

#[test]
fn unnamed_refs_are_discriminated_on_the_wire_and_restored_after() {
    let mut bom = Bom::new();
    bom.add_component(Component::new(ComponentType::Library, "first"));
    bom.add_component(Component::new(ComponentType::Library, "second"));

    let out = serialize_bom(&bom, OutputFormat::Json, SchemaVersion::V1_4, false).expect("renders");
    let doc: serde_json::Value = serde_json::from_str(&out).expect("valid JSON");

    let refs: Vec<&str> = doc["components"]
        .as_array()
        .expect("components")
        .iter()
        .map(|c| c["bom-ref"].as_str().expect("discriminated ref"))
        .collect();
    assert_eq!(refs.len(), 2);
    assert_ne!(refs[0], refs[1], "wire refs must be unique");

    for component in bom.components() {
        assert_eq!(component.bom_ref().value(), None, "restored after the call");
    }
}

#[test]
fn colliding_refs_are_restored_after_a_failed_serialization() {
    let mut bom = Bom::new();
    bom.add_component(named("dup"));
    bom.add_component(
        Component::new(ComponentType::Firmware, "bios").with_bom_ref_value("dup"),
    );

    let err = serialize_bom(&bom, OutputFormat::Xml, SchemaVersion::V1_0, false)
        .expect_err("firmware is not expressible at 1.0");
    assert!(matches!(err, Error::UnsupportedComponentType { .. }));

    let values: Vec<Option<String>> = bom
        .components()
        .iter()
        .map(|c| c.bom_ref().value())
        .collect();
    assert_eq!(
        values,
        [Some("dup".to_owned()), Some("dup".to_owned())],
        "original (colliding) values are back untouched"
    );
}

// ============================================================================
// Structural equivalence of the two formats
// ============================================================================

#[test]
fn json_and_xml_carry_the_same_structure() {
    let mut component = Component::new(ComponentType::Library, "flask")
        .with_group("pallets")
        .with_version("2.3.2")
        .with_bom_ref_value("pkg:pypi/flask@2.3.2");
    component.description = Some("web framework".to_owned());
    component.licenses = Some(Licensing::Choice(LicenseChoice::expression(
        "BSD-3-Clause",
    )));
    component.purl = Some("pkg:pypi/flask@2.3.2".parse().expect("valid purl"));
    component.add_hashes([("SHA-256", "deadbeef")]);
    component.add_external_reference(
        ExternalReference::new(ExternalRefType::Website, "https://flask.palletsprojects.com")
            .with_comment("project home"),
    );

    let mut bom = Bom::new();
    bom.add_component(component);

    let json_out = JsonSerializer::new(SchemaVersion::V1_4)
        .expect("supported")
        .serialize(&bom, false)
        .expect("renders");
    let xml_out = XmlSerializer::new(SchemaVersion::V1_4)
        .expect("supported")
        .serialize(&bom, false)
        .expect("renders");

    for fragment in [
        "pallets",
        "flask",
        "2.3.2",
        "web framework",
        "BSD-3-Clause",
        "pkg:pypi/flask@2.3.2",
        "deadbeef",
        "SHA-256",
        "https://flask.palletsprojects.com",
        "project home",
    ] {
        assert!(json_out.contains(fragment), "JSON missing {fragment}: {json_out}");
        assert!(xml_out.contains(fragment), "XML missing {fragment}: {xml_out}");
    }
}

#[test]
fn pretty_xml_is_indented() {
    let mut bom = Bom::new();
    bom.add_component(named("a"));

    let out = serialize_bom(&bom, OutputFormat::Xml, SchemaVersion::V1_4, true).expect("renders");
    assert!(out.contains("\n  <components>"), "{out}");
    assert!(out.contains("<name>a</name>"), "text content stays inline: {out}");
}
