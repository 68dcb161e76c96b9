// src/layout_tests.rs

#[cfg(test)]
mod tests {
    use crate::assembler::{ReportAssembler, TOTAL_LABEL};
    use crate::layout::*;
    use crate::period::ReportPeriod;
    use crate::record::{AttendanceRecord, DayPunch};
    use crate::surface::*;

    fn small_table(rows: usize) -> TableBlock {
        TableBlock {
            head: vec!["Dia".to_string(), "Horas".to_string()],
            body: (1..=rows).map(|i| vec![i.to_string(), "-".to_string()]).collect(),
            style: TableStyle {
                font_size: 8.0,
                cell_padding: 1.0,
                column_widths: vec![20.0, 20.0],
                head_fill: Rgb::HEADER_BLUE,
                head_text: Rgb::WHITE,
                stripe_fill: Rgb::STRIPE,
                bold_last_row: false,
            },
        }
    }

    fn line(text: &str) -> Block {
        Block::text(text, TextStyle::new(10.0, Rgb::MUTED), 6.0)
    }

    fn employee(name: &str) -> AttendanceRecord {
        let mut record = AttendanceRecord {
            name: name.to_string(),
            ..Default::default()
        };
        record.days[4] = DayPunch {
            check_in: Some("08:00".to_string()),
            check_out: Some("12:00".to_string()),
        };
        record
    }

    #[test]
    fn test_each_section_starts_a_new_page() {
        let driver = LayoutDriver::default();
        let mut first = PageSection::new();
        first.push(line("a"));
        let mut second = PageSection::new();
        second.push(line("b"));

        let pages = driver.layout(&[first, second]);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].items[0].y, driver.geometry().top());
        assert_eq!(pages[1].items[0].y, driver.geometry().top());
    }

    #[test]
    fn test_cursor_advances_by_block_height() {
        let driver = LayoutDriver::default();
        let mut section = PageSection::new();
        section
            .push(line("a"))
            .push(Block::Spacer(4.0))
            .push(line("b"));

        let pages = driver.layout(&[section]);
        let ys: Vec<f32> = pages[0].items.iter().map(|i| i.y).collect();
        assert_eq!(ys, vec![15.0, 25.0]);
    }

    #[test]
    fn test_assembled_employee_fits_one_page() {
        let assembler = ReportAssembler::default();
        let period = ReportPeriod::new("fevereiro", "2030").unwrap();
        let section = assembler.section_for(&employee("Maria"), &period);

        let pages = LayoutDriver::default().layout(&[section]);
        assert_eq!(pages.len(), 1);

        let geometry = PageGeometry::default();
        let table_item = pages[0]
            .items
            .iter()
            .find(|i| matches!(i.block, Block::Table(_)))
            .unwrap();
        if let Block::Table(table) = &table_item.block {
            assert_eq!(table.body.len(), 32);
            assert_eq!(table.body[31][0], TOTAL_LABEL);
            assert!(table_item.y + table.height() <= geometry.bottom());
        }
    }

    #[test]
    fn test_table_that_does_not_fit_moves_whole_to_next_page() {
        let geometry = PageGeometry {
            height: 100.0,
            ..PageGeometry::default()
        };
        let driver = LayoutDriver::new(geometry);
        let mut section = PageSection::new();
        for i in 0..8 {
            section.push(line(&format!("linha {}", i)));
        }
        section.push(Block::Table(small_table(6)));

        let pages = driver.layout(&[section]);
        assert_eq!(pages.len(), 2);
        assert!(pages[0]
            .items
            .iter()
            .all(|i| matches!(i.block, Block::Text { .. })));
        assert_eq!(pages[1].items.len(), 1);
        assert_eq!(pages[1].items[0].y, geometry.top());
    }

    #[test]
    fn test_heading_moves_with_its_table() {
        let geometry = PageGeometry {
            height: 100.0,
            ..PageGeometry::default()
        };
        let mut section = PageSection::new();
        for i in 0..7 {
            section.push(line(&format!("linha {}", i)));
        }
        section
            .push(Block::heading("Registro", TextStyle::new(12.0, Rgb::DARK), 8.0))
            .push(Block::Table(small_table(6)));

        let pages = LayoutDriver::new(geometry).layout(&[section]);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].items.len(), 7);
        assert_eq!(pages[1].items.len(), 2);
        assert!(matches!(
            &pages[1].items[0].block,
            Block::Text { text, .. } if text == "Registro"
        ));
        assert_eq!(pages[1].items[0].y, geometry.top());
        assert_eq!(pages[1].items[1].y, geometry.top() + 8.0);
    }

    #[test]
    fn test_heading_stays_with_oversized_table() {
        let geometry = PageGeometry {
            height: 80.0,
            ..PageGeometry::default()
        };
        let mut section = PageSection::new();
        section
            .push(Block::heading("Registro", TextStyle::new(12.0, Rgb::DARK), 8.0))
            .push(Block::Table(small_table(40)));

        let pages = LayoutDriver::new(geometry).layout(&[section]);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].items.len(), 2);
    }

    #[test]
    fn test_oversized_table_is_never_split() {
        let geometry = PageGeometry {
            height: 80.0,
            ..PageGeometry::default()
        };
        let mut section = PageSection::new();
        section.push(Block::Table(small_table(40)));

        let pages = LayoutDriver::new(geometry).layout(&[section]);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].items.len(), 1);
    }

    #[test]
    fn test_long_text_continues_on_next_page() {
        let geometry = PageGeometry {
            height: 60.0,
            ..PageGeometry::default()
        };
        let mut section = PageSection::new();
        for i in 0..10 {
            section.push(line(&format!("linha {}", i)));
        }

        let pages = LayoutDriver::new(geometry).layout(&[section]);
        // 30mm of usable height fits five 6mm lines per page
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].items.len(), 5);
        assert_eq!(pages[1].items.len(), 5);
    }

    #[test]
    fn test_render_adds_footer_with_total_page_count() {
        let geometry = PageGeometry::default();
        let driver = LayoutDriver::new(geometry);
        let sections: Vec<PageSection> = ["a", "b", "c"]
            .iter()
            .map(|t| {
                let mut s = PageSection::new();
                s.push(line(t));
                s
            })
            .collect();
        let pages = driver.layout(&sections);

        let mut surface = RecordingSurface::new();
        let footer = Footer {
            generated_at: "01/03/2030 10:00:00".to_string(),
        };
        render(&pages, &geometry, &footer, &mut surface);

        assert_eq!(surface.page_count(), 3);
        for (index, page) in surface.pages.iter().enumerate() {
            let texts: Vec<&str> = page.texts().collect();
            assert!(texts.contains(&"Gerado em: 01/03/2030 10:00:00"));
            let marker = format!("Página {} de 3", index + 1);
            assert!(texts.contains(&marker.as_str()), "missing {}", marker);
        }
    }
}
