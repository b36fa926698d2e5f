use std::io::Write;

use chrono::{DateTime, FixedOffset, Local};
use listview::{ListController, Machine, Provider, Resource, Session};

use crate::error::CtlError;

/// Rows the terminal can print as a table.
pub trait TableRow: Resource {
    /// Display text for the column with `key`; empty for unknown keys.
    fn cell(&self, key: &str, now: DateTime<FixedOffset>) -> String;
}

impl TableRow for Machine {
    fn cell(&self, key: &str, _now: DateTime<FixedOffset>) -> String {
        let value = match key {
            "owner" => &self.owner,
            "name" => &self.name,
            "displayName" => &self.display_name,
            "createdTime" => &self.created_time,
            "expireTime" => &self.expire_time,
            "region" => &self.region,
            "zone" => &self.zone,
            "category" => &self.category,
            "type" => &self.kind,
            "size" => &self.size,
            "image" => &self.image,
            "publicIp" => &self.public_ip,
            "privateIp" => &self.private_ip,
            "state" => &self.state,
            _ => return String::new(),
        };
        value.clone()
    }
}

impl TableRow for Provider {
    fn cell(&self, key: &str, _now: DateTime<FixedOffset>) -> String {
        let value = match key {
            "owner" => &self.owner,
            "name" => &self.name,
            "displayName" => &self.display_name,
            "createdTime" => &self.created_time,
            "category" => &self.category,
            "type" => &self.kind,
            "region" => &self.region,
            "state" => &self.state,
            _ => return String::new(),
        };
        value.clone()
    }
}

impl TableRow for Session {
    fn cell(&self, key: &str, now: DateTime<FixedOffset>) -> String {
        match key {
            "name" => self.name.clone(),
            "protocol" => self.protocol.clone(),
            "ip" => self.ip.clone(),
            "connectedTime" => self.connected_time.clone(),
            "connectedTimeDur" => self.connected_duration(now),
            _ => String::new(),
        }
    }
}

/// Write the page's rows as TSV (with a header) or as JSON lines.
///
/// An unauthorized page prints an access-denied line instead of the table
/// and returns [`CtlError::AccessDenied`].
pub fn render_page<R: TableRow, W: Write>(
    page: &ListController<R>,
    json_mode: bool,
    writer: &mut W,
) -> Result<(), CtlError> {
    let kind = page.binding().kind;
    if !page.is_authorized() {
        writeln!(writer, "access denied: you may not view {kind}")?;
        writer.flush()?;
        return Err(CtlError::AccessDenied(kind));
    }

    let now = Local::now().fixed_offset();
    let columns = page.binding().columns();

    if json_mode {
        for row in page.rows() {
            serde_json::to_writer(&mut *writer, row)?;
            writer.write_all(b"\n")?;
        }
    } else {
        // TSV: id \t column... ; id is the owner/name row key
        let mut line = String::from("id");
        for column in columns {
            line.push('\t');
            line.push_str(column.key);
        }
        writeln!(writer, "{line}")?;

        for row in page.rows() {
            line.clear();
            line.push_str(&row.identity().to_string());
            for column in columns {
                line.push('\t');
                line.push_str(&sanitize(&row.cell(column.key, now)));
            }
            writeln!(writer, "{line}")?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Keep one row per line and one cell per tab stop.
fn sanitize(cell: &str) -> String {
    cell.replace(['\t', '\n', '\r'], " ")
}
