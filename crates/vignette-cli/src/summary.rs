use console::{Style, StyledObject};
use vignette_core::config::SceneConfig;
use vignette_core::layout::rotated_extent;
use vignette_core::{DisplayedImage, RenderNode};

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    timing: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            timing: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_scene_plan<N: RenderNode>(config: &SceneConfig, images: &[DisplayedImage<N>]) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to(&config.title));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(config.title.chars().count().max(8))));
    println!(
        "  {:<14}{}",
        s.label.apply_to("Canvas"),
        s.value.apply_to(format!("{}x{}", config.width, config.height))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Images"),
        s.value.apply_to(images.len())
    );

    for (id, image) in images.iter().enumerate() {
        println!();
        println!(
            "  {} {}",
            s.header.apply_to(format!("#{id}")),
            s.path.apply_to(image.source().path().display())
        );
        println!(
            "    {:<12}{}",
            s.label.apply_to("Source"),
            s.value.apply_to(format!(
                "{}x{}",
                image.source_width(),
                image.source_height()
            ))
        );
        println!(
            "    {:<12}{}",
            s.label.apply_to("Position"),
            s.value.apply_to(format!("({}, {})", image.x(), image.y()))
        );
        println!(
            "    {:<12}{}  {}",
            s.label.apply_to("View"),
            s.value.apply_to(format!(
                "{}x{}",
                image.view_width(),
                image.view_height()
            )),
            s.label.apply_to(format!("scale {}", image.scale()))
        );
        println!(
            "    {:<12}{}",
            s.label.apply_to("Ratio"),
            ratio_label(&s, image.preserve_ratio())
        );
        if image.angle() != 0.0 {
            let [bw, bh] = rotated_extent(image.paint_size(), image.angle());
            println!(
                "    {:<12}{}  {}",
                s.label.apply_to("Rotation"),
                s.value.apply_to(format!("{} deg", image.angle())),
                s.label.apply_to(format!("bounds {bw:.1}x{bh:.1}"))
            );
        }

        match image.pending_schedule() {
            Some(schedule) => {
                for change in schedule.changes() {
                    let verb = if change.visible { "show" } else { "hide" };
                    println!(
                        "    {:<12}{}",
                        s.label.apply_to(verb),
                        s.timing.apply_to(format!("at {:.3}s", change.at.as_secs_f64()))
                    );
                }
                let end = schedule.state_at(schedule.total_duration());
                println!(
                    "    {:<12}{}",
                    s.label.apply_to("Ends"),
                    s.value.apply_to(visibility_label(end.unwrap_or(true)))
                );
            }
            None => println!(
                "    {:<12}{}",
                s.label.apply_to("Timeline"),
                s.disabled.apply_to("always visible")
            ),
        }
    }
    println!();
}

fn ratio_label(s: &Styles, preserve: bool) -> StyledObject<&'static str> {
    if preserve {
        s.value.apply_to("preserved")
    } else {
        s.disabled.apply_to("stretched")
    }
}

fn visibility_label(visible: bool) -> &'static str {
    if visible { "visible" } else { "hidden" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_label() {
        let s = Styles::new();
        assert_eq!(ratio_label(&s, true).force_styling(false).to_string(), "preserved");
        assert_eq!(ratio_label(&s, false).force_styling(false).to_string(), "stretched");
    }

    #[test]
    fn test_visibility_label() {
        assert_eq!(visibility_label(true), "visible");
        assert_eq!(visibility_label(false), "hidden");
    }
}
