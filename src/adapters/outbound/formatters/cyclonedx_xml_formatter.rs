use crate::application::read_models::{
    ComponentView, LicenseView, SbomMetadataView, SbomReadModel,
};
use crate::ports::outbound::SbomFormatter;
use crate::shared::Result;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

const BOM_NAMESPACE_PREFIX: &str = "http://cyclonedx.org/schema/bom/";

type XmlWriter = Writer<Vec<u8>>;

/// CycloneDxXmlFormatter adapter rendering the CycloneDX XML document
///
/// Optional sections (`group`, `hashes`, `licenses`,
/// `externalReferences`) are left out when absent; `description` is
/// always written, empty if the package has none.
pub struct CycloneDxXmlFormatter;

impl CycloneDxXmlFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CycloneDxXmlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl SbomFormatter for CycloneDxXmlFormatter {
    fn format(&self, model: &SbomReadModel) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

        let namespace = format!("{}{}", BOM_NAMESPACE_PREFIX, model.spec_version);
        let version = model.version.to_string();
        let mut bom = BytesStart::new("bom");
        bom.push_attribute(("xmlns", namespace.as_str()));
        if let Some(serial_number) = &model.serial_number {
            bom.push_attribute(("serialNumber", serial_number.as_str()));
        }
        bom.push_attribute(("version", version.as_str()));
        writer.write_event(Event::Start(bom))?;

        write_metadata(&mut writer, &model.metadata)?;

        start(&mut writer, "components")?;
        for component in &model.components {
            write_component(&mut writer, component)?;
        }
        end(&mut writer, "components")?;

        end(&mut writer, "bom")?;

        let mut output = String::from_utf8(writer.into_inner())?;
        output.push('\n');
        Ok(output)
    }
}

fn start(writer: &mut XmlWriter, name: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    Ok(())
}

fn end(writer: &mut XmlWriter, name: &str) -> Result<()> {
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// `<name>text</name>`; an empty text still yields an open/close pair
fn text_element(writer: &mut XmlWriter, name: &str, text: &str) -> Result<()> {
    start(writer, name)?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    end(writer, name)
}

fn write_metadata(writer: &mut XmlWriter, metadata: &SbomMetadataView) -> Result<()> {
    start(writer, "metadata")?;
    text_element(writer, "timestamp", &metadata.timestamp)?;
    start(writer, "tools")?;
    start(writer, "tool")?;
    text_element(writer, "name", &metadata.tool_name)?;
    text_element(writer, "version", &metadata.tool_version)?;
    end(writer, "tool")?;
    end(writer, "tools")?;
    end(writer, "metadata")
}

fn write_component(writer: &mut XmlWriter, component: &ComponentView) -> Result<()> {
    let mut element = BytesStart::new("component");
    element.push_attribute(("type", component.component_type.as_str()));
    element.push_attribute(("bom-ref", component.bom_ref.as_str()));
    writer.write_event(Event::Start(element))?;

    if let Some(group) = &component.group {
        text_element(writer, "group", group)?;
    }
    text_element(writer, "name", &component.name)?;
    text_element(writer, "version", &component.version)?;
    text_element(
        writer,
        "description",
        component.description.as_deref().unwrap_or_default(),
    )?;

    if let Some(hashes) = &component.hashes {
        start(writer, "hashes")?;
        for hash in hashes {
            let mut element = BytesStart::new("hash");
            element.push_attribute(("alg", hash.algorithm.as_str()));
            writer.write_event(Event::Start(element))?;
            writer.write_event(Event::Text(BytesText::new(&hash.digest)))?;
            end(writer, "hash")?;
        }
        end(writer, "hashes")?;
    }

    if let Some(licenses) = &component.licenses {
        start(writer, "licenses")?;
        for license in licenses {
            write_license(writer, license)?;
        }
        end(writer, "licenses")?;
    }

    text_element(writer, "purl", &component.purl)?;

    if let Some(references) = &component.external_references {
        start(writer, "externalReferences")?;
        for reference in references {
            let mut element = BytesStart::new("reference");
            element.push_attribute(("type", reference.reference_type.as_str()));
            writer.write_event(Event::Start(element))?;
            text_element(writer, "url", &reference.url)?;
            end(writer, "reference")?;
        }
        end(writer, "externalReferences")?;
    }

    end(writer, "component")
}

fn write_license(writer: &mut XmlWriter, license: &LicenseView) -> Result<()> {
    start(writer, "license")?;
    if let Some(id) = &license.id {
        text_element(writer, "id", id)?;
    }
    if let Some(name) = &license.name {
        text_element(writer, "name", name)?;
    }
    if let Some(text) = &license.text {
        let mut element = BytesStart::new("text");
        if let Some(content_type) = &text.content_type {
            element.push_attribute(("content-type", content_type.as_str()));
        }
        writer.write_event(Event::Start(element))?;
        writer.write_event(Event::Text(BytesText::new(&text.content)))?;
        end(writer, "text")?;
    }
    end(writer, "license")
}
