//! TUI rendering — SOC dashboard layout.
//!
//! ┌──────────────────────────────────────────────┐
//! │  🛡 SIPWatch   tick #12   every 5.0s          │
//! ├──────────────────────────────────────────────┤
//! │  1 Overview │ 2 Live Calls │ 3 Analytics │ …  │
//! ├──────────────────────────────────────────────┤
//! │                                              │
//! │              active tab content              │
//! │                                              │
//! ├──────────────────────────────────────────────┤
//! │  tab/←→ switch   p: pause   s: export  q: quit│
//! └──────────────────────────────────────────────┘

use super::app::{App, Tab};
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine};
use ratatui::{prelude::*, widgets::*};

use sipwatch_core::catalog::threat_score_class;
use sipwatch_core::presentation::{self, BadgeVariant, Icon, MAP_LEGEND, Tone, quality_tier};
use sipwatch_core::{Alert, ThreatClass, format_millions, format_percent};

pub fn draw(f: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Length(3), // tabs
            Constraint::Min(10),   // main
            Constraint::Length(1), // keys
        ])
        .split(f.area());

    draw_title(f, rows[0], app);
    draw_tabs(f, rows[1], app);
    match app.tab() {
        Tab::Overview => draw_overview(f, rows[2], app),
        Tab::LiveCalls => draw_calls(f, rows[2], app),
        Tab::Analytics => draw_analytics(f, rows[2], app),
        Tab::Alerts => draw_alerts(f, rows[2], app),
        Tab::Network => draw_network(f, rows[2], app),
    }
    draw_keys(f, rows[3], app);
}

// ---------------------------------------------------------------------------
// Styling
// ---------------------------------------------------------------------------

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Success => Color::Green,
        Tone::Warning => Color::Yellow,
        Tone::Destructive => Color::Red,
        Tone::Muted => Color::DarkGray,
        Tone::Primary => Color::Cyan,
    }
}

fn badge_style(variant: BadgeVariant) -> Style {
    match variant {
        BadgeVariant::Default => Style::default().fg(Color::Cyan).bold(),
        BadgeVariant::Secondary => Style::default().fg(Color::Gray),
        BadgeVariant::Destructive => Style::default().fg(Color::Red).bold(),
        BadgeVariant::Outline => Style::default().fg(Color::White),
    }
}

fn badge(text: &str, variant: BadgeVariant) -> Span<'static> {
    Span::styled(format!("[{text}]"), badge_style(variant))
}

fn icon_glyph(icon: Icon) -> &'static str {
    match icon {
        Icon::AlertTriangle => "▲",
        Icon::Shield => "◆",
        Icon::Target => "◎",
        Icon::Server => "▣",
        Icon::Wifi => "≋",
        Icon::Globe => "●",
    }
}

fn panel(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} "))
}

// ---------------------------------------------------------------------------
// Chrome
// ---------------------------------------------------------------------------

fn draw_title(f: &mut Frame, area: Rect, app: &App) {
    let secs = app.interval().as_secs_f64();
    let mut spans = vec![
        Span::styled(" 🛡 SIPWatch ", Style::default().bold().fg(Color::Cyan)),
        Span::raw("  VoIP security operations"),
        Span::styled(
            format!("  tick #{}  every {secs:.1}s ", app.tick_count()),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    if app.is_paused() {
        spans.push(Span::styled(" PAUSED ", Style::default().bold().fg(Color::Yellow)));
    }
    if let Some(err) = app.export_error() {
        spans.push(Span::styled(
            format!(" export failed: {err} "),
            Style::default().fg(Color::Red),
        ));
    } else if let Some(path) = app.last_export() {
        spans.push(Span::styled(
            format!(" saved {} ", path.display()),
            Style::default().fg(Color::Green),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Line::from(spans));
    f.render_widget(block, area);
}

fn draw_tabs(f: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<String> = Tab::ALL
        .iter()
        .map(|t| format!("{} {}", t.index() + 1, t.label()))
        .collect();
    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL))
        .select(app.tab().index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(Style::default().bold().fg(Color::Yellow))
        .divider("│");
    f.render_widget(tabs, area);
}

fn draw_keys(f: &mut Frame, area: Rect, app: &App) {
    let text = if app.tab() == Tab::Network {
        " tab/←→ switch   ↑↓ select node   p: pause   r: refresh   s: export   q: quit"
    } else {
        " tab/←→ switch   1-5 jump   p: pause   r: refresh   s: export   q: quit"
    };
    let bar = Paragraph::new(text).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(bar, area);
}

// ---------------------------------------------------------------------------
// Overview
// ---------------------------------------------------------------------------

fn draw_overview(f: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(6)])
        .split(area);
    draw_cards(f, rows[0], app);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[1]);

    let items: Vec<ListItem> = app.overview_alerts().iter().map(alert_item).collect();
    f.render_widget(List::new(items).block(panel("Recent Alerts")), cols[0]);

    draw_network_stats(f, cols[1], app);
}

fn draw_cards(f: &mut Frame, area: Rect, app: &App) {
    let o = &app.snapshot().overview;
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    let risk = threat_score_class(o.threat_score);
    let risk_color = match risk {
        ThreatClass::Low => Color::Green,
        ThreatClass::Medium => Color::Yellow,
        ThreatClass::High => Color::Red,
    };

    let cards = [
        ("Active Calls", o.active_calls.to_string(), Span::raw("live sessions")),
        ("Total Endpoints", o.total_endpoints.to_string(), Span::raw("registered")),
        (
            "Threat Score",
            o.threat_score.to_string(),
            Span::styled(format!("{} risk", risk.label()), Style::default().fg(risk_color)),
        ),
        (
            "Packets Processed",
            format_millions(o.packets_processed),
            Span::raw("this session"),
        ),
    ];

    for ((title, value, caption), area) in cards.into_iter().zip(cols.iter()) {
        let text = vec![
            Line::from(Span::styled(value, Style::default().bold().fg(Color::White))),
            Line::from(caption),
        ];
        f.render_widget(Paragraph::new(text).block(panel(title)), *area);
    }
}

fn draw_network_stats(f: &mut Frame, area: Rect, app: &App) {
    let n = &app.snapshot().network_stats;
    let block = panel("Network Status");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1); 4])
        .split(inner);

    let bandwidth = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan))
        .percent(n.bandwidth_pct.min(100) as u16)
        .label(format!("Bandwidth {}", format_percent(n.bandwidth_pct)));
    f.render_widget(bandwidth, rows[0]);

    let lines = [
        format!("Latency      {}ms", n.latency_ms),
        format!("Packet loss  {}%", n.packet_loss_pct),
        format!("Jitter       {}ms", n.jitter_ms),
    ];
    for (line, area) in lines.into_iter().zip(rows.iter().skip(1)) {
        f.render_widget(Paragraph::new(line), *area);
    }
}

// ---------------------------------------------------------------------------
// Live calls
// ---------------------------------------------------------------------------

fn draw_calls(f: &mut Frame, area: Rect, app: &App) {
    let header = Row::new(vec!["ID", "From", "To", "Status", "Duration", "Threat"])
        .style(Style::default().bold().fg(Color::Cyan));

    let rows: Vec<Row> = app
        .snapshot()
        .recent_calls
        .iter()
        .map(|c| {
            Row::new(vec![
                Cell::from(format!("#{}", c.id)),
                Cell::from(c.from.clone()),
                Cell::from(c.to.clone()),
                Cell::from(badge(c.status.label(), presentation::status_badge(c.status))),
                Cell::from(c.duration.to_string()),
                Cell::from(badge(c.threat.label(), presentation::threat_badge(c.threat))),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Percentage(28),
        Constraint::Percentage(28),
        Constraint::Length(12),
        Constraint::Length(9),
        Constraint::Length(9),
    ];
    let title = format!("Live Call Monitoring ({} sessions)", rows.len());
    let table = Table::new(rows, widths).header(header).block(panel(&title));
    f.render_widget(table, area);
}

// ---------------------------------------------------------------------------
// Analytics
// ---------------------------------------------------------------------------

fn draw_analytics(f: &mut Frame, area: Rect, app: &App) {
    let a = app.analytics();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[0]);

    let m = &a.metrics;
    let busiest = a
        .busiest_hour()
        .map(|h| format!("{:02}:00 ({} calls)", h.hour, h.calls))
        .unwrap_or_else(|| "—".into());
    let summary = vec![
        Line::from(format!("Total calls     {}", m.total_calls)),
        Line::from(format!("Active calls    {}", m.active_calls)),
        Line::from(format!("Avg duration    {}", m.average_duration)),
        Line::from(format!("Call quality    {}", format_percent(m.call_quality))),
        Line::from(format!("Success rate    {}%", m.success_rate)),
        Line::from(format!("Busiest hour    {busiest}")),
    ];
    f.render_widget(Paragraph::new(summary).block(panel("Call Metrics")), top[0]);

    let labels: Vec<String> = m.peak_hours.iter().map(|h| format!("{:02}h", h.hour)).collect();
    let data: Vec<(&str, u64)> = labels
        .iter()
        .zip(m.peak_hours.iter())
        .map(|(l, h)| (l.as_str(), u64::from(h.calls)))
        .collect();
    let chart = BarChart::default()
        .block(panel("Peak Hours"))
        .data(data.as_slice())
        .bar_width(5)
        .bar_gap(2)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().bold().fg(Color::Black).bg(Color::Cyan));
    f.render_widget(chart, top[1]);

    let quality: Vec<ListItem> = a
        .quality
        .iter()
        .map(|q| {
            let tier = quality_tier(q.value);
            ListItem::new(Line::from(vec![
                Span::raw(format!("{:<22}{:>4}  ", q.name, format_percent(q.value))),
                Span::styled(tier.label(), Style::default().fg(tone_color(tier.tone()))),
            ]))
        })
        .collect();
    f.render_widget(List::new(quality).block(panel("Call Quality")), rows[1]);
}

// ---------------------------------------------------------------------------
// Alerts
// ---------------------------------------------------------------------------

fn alert_item(alert: &Alert) -> ListItem<'static> {
    let color = tone_color(presentation::alert_tone(alert.kind));
    ListItem::new(vec![
        Line::from(vec![
            Span::styled(
                format!("{} ", icon_glyph(presentation::alert_icon(alert.kind))),
                Style::default().fg(color),
            ),
            Span::styled(alert.title.clone(), Style::default().bold()),
            Span::raw(" "),
            badge(alert.kind.label(), presentation::alert_badge(alert.kind)),
        ]),
        Line::from(Span::styled(
            format!("  {}", alert.message),
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            format!(
                "  {} · {} · severity {}/10",
                alert.source, alert.timestamp, alert.severity
            ),
            Style::default().fg(Color::DarkGray),
        )),
    ])
}

fn draw_alerts(f: &mut Frame, area: Rect, app: &App) {
    let alerts = &app.snapshot().alerts;
    let items: Vec<ListItem> = alerts.iter().map(alert_item).collect();
    let title = format!("Security Alerts ({})", alerts.len());
    f.render_widget(List::new(items).block(panel(&title)), area);
}

// ---------------------------------------------------------------------------
// Network
// ---------------------------------------------------------------------------

fn draw_network(f: &mut Frame, area: Rect, app: &App) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);
    draw_map(f, cols[0], app);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(7), Constraint::Length(8), Constraint::Length(7)])
        .split(cols[1]);
    draw_node_list(f, right[0], app);
    draw_node_detail(f, right[1], app);
    draw_performance(f, right[2], app);
}

fn draw_performance(f: &mut Frame, area: Rect, app: &App) {
    let n = &app.snapshot().network_stats;
    let block = panel("Network Performance");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let protocols = app.protocols();
    let slots = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(1); protocols.len() + 2])
        .split(inner);

    let realtime = format!(
        "{}ms  loss {}  jitter {}ms",
        n.latency_ms,
        format_percent(n.packet_loss_pct),
        n.jitter_ms
    );
    f.render_widget(Paragraph::new(realtime), slots[0]);
    f.render_widget(
        Paragraph::new("Protocol distribution").style(Style::default().fg(Color::DarkGray)),
        slots[1],
    );
    for (p, slot) in protocols.iter().zip(slots.iter().skip(2)) {
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Magenta))
            .percent(p.percent.min(100) as u16)
            .label(format!("{} {}", p.name, format_percent(p.percent)));
        f.render_widget(gauge, *slot);
    }
}

fn draw_map(f: &mut Frame, area: Rect, app: &App) {
    let topology = app.topology();
    let nodes = topology.nodes();
    let links = topology.links();
    let selected = app.selected_index();

    // Node positions are percentages from the top-left; canvas y grows upward.
    let point = |i: usize| {
        let loc = nodes[i].location;
        (f64::from(loc.x), 100.0 - f64::from(loc.y))
    };

    let legend: Vec<Span> = MAP_LEGEND
        .iter()
        .map(|(tone, label)| {
            Span::styled(format!(" ● {label}"), Style::default().fg(tone_color(*tone)))
        })
        .collect();

    let canvas = Canvas::default()
        .block(panel("Network Topology").title_bottom(Line::from(legend)))
        .marker(symbols::Marker::Braille)
        .x_bounds([0.0, 100.0])
        .y_bounds([0.0, 100.0])
        .paint(|ctx| {
            for link in &links {
                let (x1, y1) = point(link.a);
                let (x2, y2) = point(link.b);
                ctx.draw(&CanvasLine::new(x1, y1, x2, y2, Color::DarkGray));
            }
            ctx.layer();
            for (i, node) in nodes.iter().enumerate() {
                let (x, y) = point(i);
                let mut style = Style::default().fg(tone_color(presentation::node_color(node)));
                if selected == Some(i) {
                    style = style.bold().reversed();
                }
                let glyph = icon_glyph(presentation::node_icon(node.kind));
                ctx.print(x, y, Span::styled(format!("{glyph} {}", node.id), style));
            }
        });
    f.render_widget(canvas, area);
}

fn draw_node_list(f: &mut Frame, area: Rect, app: &App) {
    let selected = app.selected_index();
    let items: Vec<ListItem> = app
        .topology()
        .nodes()
        .iter()
        .enumerate()
        .map(|(i, node)| {
            let pointer = if selected == Some(i) { "▸" } else { " " };
            let color = tone_color(presentation::node_color(node));
            let line = Line::from(vec![
                Span::raw(format!("{pointer} ")),
                Span::styled(
                    format!("{} ", icon_glyph(presentation::node_icon(node.kind))),
                    Style::default().fg(color),
                ),
                Span::raw(format!("{:<15} ", node.ip)),
                Span::styled(node.status.label(), Style::default().fg(color)),
            ]);
            if selected == Some(i) {
                ListItem::new(line).style(Style::default().bg(Color::DarkGray))
            } else {
                ListItem::new(line)
            }
        })
        .collect();
    f.render_widget(List::new(items).block(panel("Nodes")), area);
}

fn draw_node_detail(f: &mut Frame, area: Rect, app: &App) {
    let block = panel("Node Details");
    let Some(node) = app.selected_node() else {
        let p = Paragraph::new("Press ↑↓ to select a node")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(p, area);
        return;
    };

    let text = vec![
        Line::from(vec![
            Span::raw("IP        "),
            Span::styled(node.ip.clone(), Style::default().bold()),
        ]),
        Line::from(format!("Type      {}", node.kind)),
        Line::from(vec![
            Span::raw("Status    "),
            badge(node.status.label(), presentation::node_status_badge(node.status)),
        ]),
        Line::from(vec![
            Span::raw("Threat    "),
            badge(
                node.threat_level.label(),
                presentation::node_threat_badge(node.threat_level),
            ),
        ]),
        Line::from(format!("Location  ({}, {})", node.location.x, node.location.y)),
    ];
    f.render_widget(Paragraph::new(text).block(block), area);
}
