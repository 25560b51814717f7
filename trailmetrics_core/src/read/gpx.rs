use anyhow::{bail, Result};
use log::debug;
use quick_xml::{
    events::{BytesStart, Event},
    Reader,
};

use crate::model::Gpx;

use super::{
    attributes::Attributes, metadata::parse_metadata, route::parse_route, track::parse_track,
    XmlReaderExtensions,
};

pub(crate) struct GpxAttributes {
    pub(crate) creator: String,
    pub(crate) version: String,
}

/// Parses the attributes on 'gpx' element itself. Gets around a multiple mut borrows
/// problem in the main read_gpx_from_reader() function. The XSD says both are
/// mandatory, but plenty of exporters leave them out and we don't need them.
pub(crate) fn parse_gpx_attributes(
    tag: &BytesStart<'_>,
    xml_reader: &Reader<&[u8]>,
) -> Result<GpxAttributes> {
    let mut attributes = Attributes::new(tag, xml_reader)?;

    let creator = attributes.take("creator").unwrap_or_else(|| {
        debug!("No 'creator' attribute on the GPX element");
        String::new()
    });

    let version = attributes.take("version").unwrap_or_else(|| {
        debug!("No 'version' attribute on the GPX element");
        String::new()
    });

    Ok(GpxAttributes { creator, version })
}

/// Parses the 'gpx' element itself.
pub(crate) fn parse_gpx(xml_reader: &mut Reader<&[u8]>) -> Result<Gpx> {
    let mut gpx = Gpx::default();

    loop {
        match xml_reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"metadata" => {
                    gpx.metadata = parse_metadata(xml_reader)?;
                }
                b"trk" => {
                    let track = parse_track(xml_reader)?;
                    gpx.tracks.push(track);
                }
                b"rte" => {
                    let route = parse_route(xml_reader)?;
                    gpx.routes.push(route);
                }
                // Waypoints and extensions don't contribute to the metrics.
                _ => xml_reader.skip_element(&e)?,
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"gpx" => {
                    return Ok(gpx);
                }
                _ => (),
            },
            Ok(Event::Eof) => {
                bail!("Reached EOF unexpectedly. File is probably corrupt.");
            }
            Err(e) => bail!("Error at position {}: {:?}", xml_reader.error_position(), e),
            _ => (),
        }
    }
}
