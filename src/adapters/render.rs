use crate::core::{Damage, Group, GroupCollection, Renderer};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

pub const NO_DATA_MESSAGE: &str = "No characters available.";

/// 群組標題，例如 "1 Hit"、"3 Hits"
pub fn group_title(hits: u64) -> String {
    format!("{} Hit{}", hits, if hits == 1 { "" } else { "s" })
}

fn icon_path(icon_base: &str, icon: &str) -> String {
    format!("{}{}", icon_base, icon)
}

/// 終端機文字輸出
pub struct TextRenderer<W: Write, E: Write> {
    out: W,
    notices: E,
    icon_base: String,
}

impl<W: Write, E: Write> TextRenderer<W, E> {
    pub fn new(out: W, notices: E, icon_base: impl Into<String>) -> Self {
        Self {
            out,
            notices,
            icon_base: icon_base.into(),
        }
    }

    pub fn into_inner(self) -> (W, E) {
        (self.out, self.notices)
    }

    fn write_group(&mut self, group: &Group) -> Result<()> {
        writeln!(self.out, "{}", group_title(group.hits))?;

        let name_width = group
            .characters
            .iter()
            .map(|c| c.character.name.chars().count())
            .max()
            .unwrap_or(0);

        for member in &group.characters {
            writeln!(
                self.out,
                "  {:<name_width$}  HP: {:>8}  [{}]",
                member.character.name,
                member.character.hp,
                icon_path(&self.icon_base, &member.character.icon),
                name_width = name_width
            )?;
        }
        Ok(())
    }
}

impl<W: Write + Send, E: Write + Send> Renderer for TextRenderer<W, E> {
    fn render(&mut self, damage: Damage, groups: &GroupCollection) -> Result<()> {
        if groups.is_empty() {
            writeln!(self.out, "{}", NO_DATA_MESSAGE)?;
            self.out.flush()?;
            return Ok(());
        }

        writeln!(self.out, "Damage per hit: {}", damage)?;
        for group in groups {
            writeln!(self.out)?;
            self.write_group(group)?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn notify(&mut self, message: &str) -> Result<()> {
        writeln!(self.notices, "{}", message)?;
        self.notices.flush()?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct JsonCharacter<'a> {
    name: &'a str,
    hp: u64,
    icon: String,
}

#[derive(Debug, Serialize)]
struct JsonGroup<'a> {
    hits: u64,
    title: String,
    characters: Vec<JsonCharacter<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    damage: Damage,
    generated_at: DateTime<Utc>,
    total_characters: usize,
    groups: Vec<JsonGroup<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
}

/// 每次渲染輸出一份 JSON 報告
pub struct JsonRenderer<W: Write, E: Write> {
    out: W,
    notices: E,
    icon_base: String,
    pretty: bool,
}

impl<W: Write, E: Write> JsonRenderer<W, E> {
    pub fn new(out: W, notices: E, icon_base: impl Into<String>, pretty: bool) -> Self {
        Self {
            out,
            notices,
            icon_base: icon_base.into(),
            pretty,
        }
    }

    pub fn into_inner(self) -> (W, E) {
        (self.out, self.notices)
    }
}

impl<W: Write + Send, E: Write + Send> Renderer for JsonRenderer<W, E> {
    fn render(&mut self, damage: Damage, groups: &GroupCollection) -> Result<()> {
        let report = JsonReport {
            damage,
            generated_at: Utc::now(),
            total_characters: groups.total_characters(),
            groups: groups
                .iter()
                .map(|group| JsonGroup {
                    hits: group.hits,
                    title: group_title(group.hits),
                    characters: group
                        .characters
                        .iter()
                        .map(|m| JsonCharacter {
                            name: &m.character.name,
                            hp: m.character.hp,
                            icon: icon_path(&self.icon_base, &m.character.icon),
                        })
                        .collect(),
                })
                .collect(),
            message: groups.is_empty().then_some(NO_DATA_MESSAGE),
        };

        if self.pretty {
            serde_json::to_writer_pretty(&mut self.out, &report)?;
        } else {
            serde_json::to_writer(&mut self.out, &report)?;
        }
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }

    fn notify(&mut self, message: &str) -> Result<()> {
        writeln!(self.notices, "{}", message)?;
        self.notices.flush()?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    hits: u64,
    name: &'a str,
    hp: u64,
    icon: String,
}

/// CSV：每個角色一列 hits,name,hp,icon
pub struct CsvRenderer<W: Write, E: Write> {
    out: W,
    notices: E,
    icon_base: String,
}

impl<W: Write, E: Write> CsvRenderer<W, E> {
    pub fn new(out: W, notices: E, icon_base: impl Into<String>) -> Self {
        Self {
            out,
            notices,
            icon_base: icon_base.into(),
        }
    }

    pub fn into_inner(self) -> (W, E) {
        (self.out, self.notices)
    }
}

impl<W: Write + Send, E: Write + Send> Renderer for CsvRenderer<W, E> {
    fn render(&mut self, _damage: Damage, groups: &GroupCollection) -> Result<()> {
        if groups.is_empty() {
            return self.notify(NO_DATA_MESSAGE);
        }

        let mut writer = csv::Writer::from_writer(&mut self.out);
        for group in groups {
            for member in &group.characters {
                writer.serialize(CsvRow {
                    hits: group.hits,
                    name: &member.character.name,
                    hp: member.character.hp,
                    icon: icon_path(&self.icon_base, &member.character.icon),
                })?;
            }
        }
        writer.flush()?;
        Ok(())
    }

    fn notify(&mut self, message: &str) -> Result<()> {
        writeln!(self.notices, "{}", message)?;
        self.notices.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::calculator::compute;
    use crate::core::Character;

    fn sample_groups() -> GroupCollection {
        compute(
            &[
                Character::new("A", 100, "a.png"),
                Character::new("B", 250, "b.png"),
                Character::new("C", 300, "c.png"),
            ],
            Damage::new(100).unwrap(),
        )
    }

    fn output(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_group_title_pluralizes() {
        assert_eq!(group_title(1), "1 Hit");
        assert_eq!(group_title(3), "3 Hits");
    }

    #[test]
    fn test_text_renderer_lists_groups_in_order() {
        let mut renderer = TextRenderer::new(Vec::new(), Vec::new(), "img/");

        renderer
            .render(Damage::new(100).unwrap(), &sample_groups())
            .unwrap();

        let (out, notices) = renderer.into_inner();
        let text = output(out);
        assert!(notices.is_empty());

        let one = text.find("1 Hit\n").unwrap();
        let three = text.find("3 Hits\n").unwrap();
        let a = text.find("A  HP:").unwrap();
        let b = text.find("B  HP:").unwrap();
        let c = text.find("C  HP:").unwrap();
        assert!(one < a && a < three && three < b && b < c);
        assert!(text.contains("[img/b.png]"));
        assert!(text.contains("HP:      250"));
    }

    #[test]
    fn test_text_renderer_empty_shows_no_data() {
        let mut renderer = TextRenderer::new(Vec::new(), Vec::new(), "img/");

        renderer
            .render(Damage::DEFAULT, &GroupCollection::default())
            .unwrap();

        let (out, _) = renderer.into_inner();
        assert_eq!(output(out), "No characters available.\n");
    }

    #[test]
    fn test_notify_goes_to_notice_stream() {
        let mut renderer = TextRenderer::new(Vec::new(), Vec::new(), "");

        renderer.notify("Please enter a valid damage value.").unwrap();

        let (out, notices) = renderer.into_inner();
        assert!(out.is_empty());
        assert_eq!(output(notices), "Please enter a valid damage value.\n");
    }

    #[test]
    fn test_json_renderer_report_shape() {
        let mut renderer = JsonRenderer::new(Vec::new(), Vec::new(), "img/", false);

        renderer
            .render(Damage::new(100).unwrap(), &sample_groups())
            .unwrap();

        let (out, _) = renderer.into_inner();
        let report: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(report["damage"], 100);
        assert_eq!(report["total_characters"], 3);
        assert!(report["generated_at"].is_string());
        assert!(report.get("message").is_none());
        assert_eq!(report["groups"][0]["hits"], 1);
        assert_eq!(report["groups"][0]["title"], "1 Hit");
        assert_eq!(report["groups"][1]["characters"][0]["name"], "B");
        assert_eq!(report["groups"][1]["characters"][1]["icon"], "img/c.png");
    }

    #[test]
    fn test_json_renderer_empty_includes_message() {
        let mut renderer = JsonRenderer::new(Vec::new(), Vec::new(), "", true);

        renderer
            .render(Damage::DEFAULT, &GroupCollection::default())
            .unwrap();

        let (out, _) = renderer.into_inner();
        let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(report["groups"].as_array().unwrap().len(), 0);
        assert_eq!(report["message"], NO_DATA_MESSAGE);
    }

    #[test]
    fn test_csv_renderer_rows() {
        let mut renderer = CsvRenderer::new(Vec::new(), Vec::new(), "");

        renderer
            .render(Damage::new(100).unwrap(), &sample_groups())
            .unwrap();

        let (out, _) = renderer.into_inner();
        let lines: Vec<String> = output(out).lines().map(str::to_string).collect();
        assert_eq!(
            lines,
            vec!["hits,name,hp,icon", "1,A,100,a.png", "3,B,250,b.png", "3,C,300,c.png"]
        );
    }

    #[test]
    fn test_csv_renderer_empty_notifies() {
        let mut renderer = CsvRenderer::new(Vec::new(), Vec::new(), "");

        renderer
            .render(Damage::DEFAULT, &GroupCollection::default())
            .unwrap();

        let (out, notices) = renderer.into_inner();
        assert!(out.is_empty());
        assert_eq!(output(notices), "No characters available.\n");
    }
}
