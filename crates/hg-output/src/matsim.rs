//! MATSim population XML backend.
//!
//! Creates `plans.xml` in the `population_v6` format:
//!
//! ```xml
//! <population>
//!   <person id="football_fan_0">
//!     <attributes>
//!       <attribute name="home_zone" class="java.lang.String">Spandau</attribute>
//!     </attributes>
//!     <plan selected="yes">
//!       <activity type="dummy" x="4584569.8" y="5820911.8" end_time="22:13:05"/>
//!       <leg mode="pt"/>
//!       <activity type="dummy" x="4581202.3" y="5824410.9"/>
//!     </plan>
//!   </person>
//! </population>
//! ```
//!
//! The closing `</population>` tag is written by `finish()`; a file written
//! without it is not well-formed.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use hg_synth::{Activity, Plan};

use crate::writer::PopulationWriter;
use crate::{OutputError, OutputResult};

const DOCTYPE: &str = r#"population SYSTEM "http://www.matsim.org/files/dtd/population_v6.dtd""#;

fn xml_err(e: impl std::fmt::Display) -> OutputError {
    OutputError::Xml(e.to_string())
}

/// Writes the population as a MATSim plans file.
pub struct MatsimPopulationWriter {
    writer: Option<Writer<BufWriter<File>>>,
    people: usize,
}

impl MatsimPopulationWriter {
    /// Create `plans.xml` in `dir` and write the document prologue.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let file = File::create(dir.join("plans.xml"))?;
        let mut writer = Writer::new_with_indent(BufWriter::new(file), b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
            .map_err(xml_err)?;
        writer
            .write_event(Event::DocType(BytesText::from_escaped(DOCTYPE)))
            .map_err(xml_err)?;
        writer
            .write_event(Event::Start(BytesStart::new("population")))
            .map_err(xml_err)?;
        Ok(Self { writer: Some(writer), people: 0 })
    }
}

fn write_activity<W: Write>(w: &mut Writer<W>, act: &Activity) -> OutputResult<()> {
    let x = act.coord.x.to_string();
    let y = act.coord.y.to_string();
    let mut elem = BytesStart::new("activity")
        .with_attributes([("type", &*act.activity_type), ("x", x.as_str()), ("y", y.as_str())]);
    if let Some(end) = act.end_time {
        elem.push_attribute(("end_time", end.to_string().as_str()));
    }
    w.write_event(Event::Empty(elem)).map_err(xml_err)
}

fn write_person<W: Write>(w: &mut Writer<W>, plan: &Plan) -> OutputResult<()> {
    w.write_event(Event::Start(BytesStart::new("person").with_attributes([("id", plan.person_id.as_str())])))
        .map_err(xml_err)?;

    w.write_event(Event::Start(BytesStart::new("attributes"))).map_err(xml_err)?;
    w.write_event(Event::Start(
        BytesStart::new("attribute").with_attributes([("name", "home_zone"), ("class", "java.lang.String")]),
    ))
    .map_err(xml_err)?;
    w.write_event(Event::Text(BytesText::new(&plan.home_zone))).map_err(xml_err)?;
    w.write_event(Event::End(BytesEnd::new("attribute"))).map_err(xml_err)?;
    w.write_event(Event::End(BytesEnd::new("attributes"))).map_err(xml_err)?;

    w.write_event(Event::Start(BytesStart::new("plan").with_attributes([("selected", "yes")])))
        .map_err(xml_err)?;
    write_activity(w, &plan.origin)?;
    w.write_event(Event::Empty(BytesStart::new("leg").with_attributes([("mode", plan.leg.mode.as_str())])))
        .map_err(xml_err)?;
    write_activity(w, &plan.destination)?;
    w.write_event(Event::End(BytesEnd::new("plan"))).map_err(xml_err)?;

    w.write_event(Event::End(BytesEnd::new("person"))).map_err(xml_err)
}

impl PopulationWriter for MatsimPopulationWriter {
    fn write_plans(&mut self, plans: &[Plan]) -> OutputResult<()> {
        let writer = self.writer.as_mut().ok_or(OutputError::Finished)?;
        for plan in plans {
            write_person(writer, plan)?;
        }
        self.people += plans.len();
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        let Some(mut writer) = self.writer.take() else {
            return Ok(());
        };
        writer
            .write_event(Event::End(BytesEnd::new("population")))
            .map_err(xml_err)?;
        writer.into_inner().flush()?;
        log::info!("wrote {} persons to plans.xml", self.people);
        Ok(())
    }
}
