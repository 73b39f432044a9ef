//! SOAP envelope example - building, querying and tearing down a response

use xmldom::{ArenaConfig, DomArena};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing (RUST_LOG=xmldom=trace shows every link change)
    tracing_subscriber::fmt::init();

    // Cap what a single peer's document may pin
    let mut arena = DomArena::with_config(ArenaConfig {
        max_nodes: Some(10_000),
        ..ArenaConfig::default()
    });

    let soap = "http://schemas.xmlsoap.org/soap/envelope/";
    let doc = arena.create_document()?;
    let envelope = arena.create_element_ns(doc, soap, "s:Envelope")?;
    let body = arena.create_element_ns(doc, soap, "s:Body")?;
    let service = "urn:schemas-upnp-org:service:SwitchPower:1";
    let response = arena.create_element_ns(doc, service, "u:GetStatusResponse")?;
    let value = arena.create_element(doc, "ResultStatus")?;
    let text = arena.create_text(doc, "1")?;

    let style = arena.create_attribute_ns(doc, soap, "s:encodingStyle")?;
    arena.set_value(style, Some("http://schemas.xmlsoap.org/soap/encoding/"))?;
    arena.set_attribute_node_ns(envelope, style)?;

    arena.append_child(doc, envelope)?;
    arena.append_child(envelope, body)?;
    arena.append_child(body, response)?;
    arena.append_child(response, value)?;
    arena.append_child(value, text)?;

    // Look up the action response by namespace
    for id in arena.find_by_tag_name_ns(doc, "*", "GetStatusResponse") {
        println!("Response element: {:?}", arena.name(id));
    }
    for id in arena.find_by_tag_name(doc, "ResultStatus") {
        println!("ResultStatus = {:?}", arena.text_content(id));
    }

    // Keep a copy of the body after the envelope is gone
    let body_copy = arena.clone_node(body, true)?;
    println!("Live nodes after clone: {}", arena.len());

    let released = arena.free(doc);
    println!("Released {} nodes with the document", released);

    if let Some(copy) = body_copy {
        println!("Copied body text: {:?}", arena.text_content(copy));
        arena.free(copy);
    }
    println!("Live nodes: {}", arena.len());

    Ok(())
}
