use anyhow::{bail, Result};
use quick_xml::{events::Event, Reader};

use crate::model::Route;

use super::{
    waypoint::{parse_empty_waypoint, parse_waypoint},
    XmlReaderExtensions,
};

pub(crate) fn parse_route(xml_reader: &mut Reader<&[u8]>) -> Result<Route> {
    let mut route = Route::default();

    loop {
        match xml_reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"name" => {
                    route.name = Some(xml_reader.read_inner_as_string()?);
                }
                b"type" => {
                    route.r#type = Some(xml_reader.read_inner_as_string()?);
                }
                b"rtept" => {
                    let point = parse_waypoint(&e, xml_reader, b"rtept")?;
                    route.points.push(point);
                }
                _ => xml_reader.skip_element(&e)?,
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"rtept" => {
                    route.points.push(parse_empty_waypoint(&e, xml_reader)?);
                }
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"rte" => {
                    return Ok(route);
                }
                _ => {}
            },
            Ok(Event::Eof) => bail!("Reached EOF inside the 'rte' element"),
            Err(e) => bail!("Error at position {}: {:?}", xml_reader.error_position(), e),
            _ => {}
        }
    }
}
