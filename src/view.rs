//! Interactive window: the grid, a population chart underneath, and mouse
//! injection (left button drops rabbits, right button drops foxes).

use piston_window::*;
use std::collections::VecDeque;
use std::error::Error;

use foxes_rabbits::config::DisplayConfig;
use foxes_rabbits::stats::PopulationSample;
use foxes_rabbits::{Animal, Position, Species, World};

const TITLE: &str = "Foxes and Rabbits Simulation";
const BACKGROUND: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const CHART_PADDING: f64 = 20.0;
const CHART_GRID: [f32; 4] = [0.78, 0.78, 0.78, 1.0];
const CHART_AXES: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
const CHART_MIN_SCALE: usize = 10;
const CHART_COLUMN_EVERY: usize = 25;

#[derive(Default)]
struct MouseState {
    left_down: bool,
    right_down: bool,
    cursor: [f64; 2],
}

impl MouseState {
    fn track(&mut self, e: &Event) {
        if let Some(cursor) = e.mouse_cursor_args() {
            self.cursor = cursor;
        }
        if let Some(Button::Mouse(button)) = e.press_args() {
            self.set_button(button, true);
        }
        if let Some(Button::Mouse(button)) = e.release_args() {
            self.set_button(button, false);
        }
    }

    fn set_button(&mut self, button: MouseButton, down: bool) {
        match button {
            MouseButton::Left => self.left_down = down,
            MouseButton::Right => self.right_down = down,
            _ => {}
        }
    }

    /// Species to drop and the grid cell under the cursor, while a button is held.
    fn injection(&self, cell_size: f64) -> Option<(Species, Position)> {
        let species = if self.left_down {
            Species::Rabbit
        } else if self.right_down {
            Species::Fox
        } else {
            return None;
        };
        let cell = Position::new(
            (self.cursor[0] / cell_size).floor() as i32,
            (self.cursor[1] / cell_size).floor() as i32,
        );
        Some((species, cell))
    }
}

pub fn run(mut world: World) -> Result<(), Box<dyn Error>> {
    let display = world.config().display.clone();
    let grid_width = world.width() as f64 * display.cell_size;
    let grid_height = world.height() as f64 * display.cell_size;

    display.validate()?;
    let window_size = [grid_width as u32, (grid_height + display.chart_height) as u32];
    let mut window: PistonWindow = WindowSettings::new(TITLE, window_size)
        .exit_on_esc(true)
        .build()?;
    window.set_ups(1000 / display.frame_time_ms.max(1));

    let mut mouse = MouseState::default();

    while let Some(e) = window.next() {
        mouse.track(&e);

        if e.update_args().is_some() {
            if let Some((species, cell)) = mouse.injection(display.cell_size) {
                if !world.is_position_occupied(cell.x, cell.y) {
                    world.spawn(species, cell)?;
                }
            }

            world.update();

            window.set_title(format!(
                "{TITLE} - Foxes: {} | Rabbits: {}",
                world.foxes().len(),
                world.rabbits().len()
            ));
        }

        window.draw_2d(&e, |c, g, _device| {
            clear(BACKGROUND, g);
            draw_grass(&world, &display, c.transform, g);
            for rabbit in world.rabbits() {
                draw_animal(rabbit, display.rabbit_color, display.cell_size, c.transform, g);
            }
            for fox in world.foxes() {
                draw_animal(fox, display.fox_color, display.cell_size, c.transform, g);
            }
            let chart_area = [0.0, grid_height, grid_width, display.chart_height];
            draw_chart(
                &world.stats.population_history,
                display.chart_history,
                chart_area,
                &display,
                c.transform,
                g,
            );
        });
    }

    log::info!("Window closed at tick {}", world.stats.tick);
    Ok(())
}

fn draw_animal(
    animal: &Animal,
    color: [f32; 4],
    cell_size: f64,
    transform: math::Matrix2d,
    g: &mut G2d,
) {
    rectangle(
        color,
        [
            animal.position.x as f64 * cell_size,
            animal.position.y as f64 * cell_size,
            cell_size,
            cell_size,
        ],
        transform,
        g,
    );
}

// Darker base colour for bare ground, full green for a full cell.
fn draw_grass(world: &World, display: &DisplayConfig, transform: math::Matrix2d, g: &mut G2d) {
    let base = display.grass_color;
    let width = world.width().max(1) as usize;
    for (idx, cell) in world.grass().iter().enumerate() {
        let x = (idx % width) as f64;
        let y = (idx / width) as f64;
        let green = base[1] + cell.fullness() * (1.0 - base[1]);
        rectangle(
            [base[0], green, base[2], base[3]],
            [
                x * display.cell_size,
                y * display.cell_size,
                display.cell_size,
                display.cell_size,
            ],
            transform,
            g,
        );
    }
}

fn draw_chart(
    history: &VecDeque<PopulationSample>,
    capacity: usize,
    area: [f64; 4],
    display: &DisplayConfig,
    transform: math::Matrix2d,
    g: &mut G2d,
) {
    let [left, top, width, height] = area;
    rectangle(BACKGROUND, area, transform, g);
    if history.len() < 2 {
        return;
    }

    let peak = history
        .iter()
        .map(|sample| sample.foxes.max(sample.rabbits))
        .max()
        .unwrap_or(0)
        .max(CHART_MIN_SCALE)
        .div_ceil(10)
        * 10;

    let chart_left = left + CHART_PADDING;
    let chart_right = left + width - CHART_PADDING;
    let chart_top = top + CHART_PADDING;
    let chart_bottom = top + height - CHART_PADDING;
    let chart_height = chart_bottom - chart_top;
    let to_y = |value: usize| chart_bottom - value as f64 / peak as f64 * chart_height;

    let step = (peak / 5).max(1);
    for value in (step..=peak).step_by(step) {
        let y = to_y(value);
        line(CHART_GRID, 0.5, [chart_left, y, chart_right, y], transform, g);
    }

    let x_step = (chart_right - chart_left) / (capacity.max(2) - 1) as f64;
    for column in (CHART_COLUMN_EVERY..capacity).step_by(CHART_COLUMN_EVERY) {
        let x = chart_left + column as f64 * x_step;
        line(CHART_GRID, 0.5, [x, chart_top, x, chart_bottom], transform, g);
    }

    line(CHART_AXES, 1.0, [chart_left, chart_top, chart_left, chart_bottom], transform, g);
    line(CHART_AXES, 1.0, [chart_left, chart_bottom, chart_right, chart_bottom], transform, g);

    for (i, (from, to)) in history.iter().zip(history.iter().skip(1)).enumerate() {
        let x1 = chart_left + i as f64 * x_step;
        let x2 = x1 + x_step;
        line(display.fox_color, 1.0, [x1, to_y(from.foxes), x2, to_y(to.foxes)], transform, g);
        line(
            display.rabbit_color,
            1.0,
            [x1, to_y(from.rabbits), x2, to_y(to.rabbits)],
            transform,
            g,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_are_tracked_independently() {
        let mut mouse = MouseState::default();
        mouse.set_button(MouseButton::Left, true);
        mouse.set_button(MouseButton::Right, true);
        assert!(mouse.left_down && mouse.right_down);

        mouse.set_button(MouseButton::Middle, true);
        assert!(mouse.left_down && mouse.right_down);

        mouse.set_button(MouseButton::Left, false);
        assert!(!mouse.left_down && mouse.right_down);
    }

    #[test]
    fn injection_follows_held_button_and_cursor() {
        let mut mouse = MouseState {
            cursor: [17.0, 9.0],
            ..Default::default()
        };
        assert_eq!(mouse.injection(8.0), None);

        mouse.set_button(MouseButton::Right, true);
        assert_eq!(mouse.injection(8.0), Some((Species::Fox, Position::new(2, 1))));

        // left wins while both are held
        mouse.set_button(MouseButton::Left, true);
        assert_eq!(
            mouse.injection(8.0),
            Some((Species::Rabbit, Position::new(2, 1)))
        );
    }
}
