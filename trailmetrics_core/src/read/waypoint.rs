use anyhow::{bail, Result};
use quick_xml::{
    events::{BytesStart, Event},
    Reader,
};

use crate::model::Waypoint;

use super::{attributes::Attributes, XmlReaderConversions, XmlReaderExtensions};

/// Parses a 'trkpt' or 'rtept' element, which we have just entered. We read
/// until the matching `end_tag`.
pub(crate) fn parse_waypoint(
    tag: &BytesStart<'_>,
    xml_reader: &mut Reader<&[u8]>,
    end_tag: &[u8],
) -> Result<Waypoint> {
    let mut point = parse_empty_waypoint(tag, xml_reader)?;

    loop {
        match xml_reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"ele" => {
                    let ele = xml_reader.read_inner_as::<f64>()?;
                    if !ele.is_finite() {
                        bail!(
                            "Elevation {ele} on the '{}' element is not a finite number",
                            xml_reader.bytes_to_cow(end_tag)?
                        );
                    }
                    point.ele = Some(ele);
                }
                b"time" => {
                    point.time = Some(xml_reader.read_inner_as_time()?);
                }
                // Garmin extensions such as heart rate, plus the rarely
                // filled in fields like 'sat' and 'hdop'.
                _ => xml_reader.skip_element(&e)?,
            },
            Ok(Event::End(e)) => {
                if e.name().as_ref() == end_tag {
                    return Ok(point);
                }
            }
            Ok(Event::Eof) => bail!(
                "Reached EOF inside the '{}' element",
                xml_reader.bytes_to_cow(end_tag)?
            ),
            Err(e) => bail!("Error at position {}: {:?}", xml_reader.error_position(), e),
            _ => {}
        }
    }
}

/// Makes a waypoint from just the lat-lon attributes. Used directly for
/// self-closing elements such as `<trkpt lat="1" lon="2"/>`. Coordinates
/// outside the WGS 84 range are rejected.
pub(crate) fn parse_empty_waypoint(
    tag: &BytesStart<'_>,
    xml_reader: &Reader<&[u8]>,
) -> Result<Waypoint> {
    let element = xml_reader.bytes_to_string(tag.name().as_ref())?;
    let mut attributes = Attributes::new(tag, xml_reader)?;
    let lat: f64 = attributes.get("lat", &element)?;
    let lon: f64 = attributes.get("lon", &element)?;

    // The range checks are false for NaN, so NaN is rejected too.
    if !(-90.0..=90.0).contains(&lat) {
        bail!("Latitude {lat} on the '{element}' element is outside -90..90");
    }
    if !(-180.0..=180.0).contains(&lon) {
        bail!("Longitude {lon} on the '{element}' element is outside -180..180");
    }

    Ok(Waypoint::with_lat_lon(lat, lon))
}
