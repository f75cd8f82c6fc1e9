use std::io::BufRead;
use std::time::Duration;

use anyhow::Result;
use glint_engine::{logging, Color, InputEvent, KeyState, Shape, Vec2, Visualization};

fn main() -> Result<()> {
    logging::init_logging();

    let mut visu = Visualization::new(800, 600)?;

    let mut presses = 0u32;
    visu.set_event_handler(move |event| {
        if let InputEvent::Key {
            state: KeyState::Pressed,
            repeat: false,
            ..
        } = event
        {
            presses += 1;
            println!("{presses}");
        }
    });
    visu.set_command_handler(|command| {
        println!("{command}");
    });

    // Nine scripted frames: a 100×100 grid of rects and circles, plus a
    // growing circle and one of each helper shape. Right-drag pans, scroll
    // zooms, backquote opens the console.
    for i in 1..10 {
        if !visu.is_running() {
            log::info!("window closed, stopping early");
            break;
        }

        for j in 0..100 {
            for k in 0..100 {
                let pos = Vec2::new(j as f32, k as f32);
                visu.add_rect(pos, Vec2::new(0.8, 0.8), Color::YELLOW);
                visu.add_circle(pos, 0.8, Color::RED);
            }
        }

        visu.add_circle(Vec2::new(10.0, 10.0), (i * 4) as f32, Color::GREEN);
        visu.add_triangle(Vec2::new(50.0, 10.0), 10.0, Color::MAGENTA);
        visu.add_diamond(Vec2::new(75.0, 10.0), 10.0, Color::CYAN);
        visu.add_rect(Vec2::new(30.0, 40.0), Vec2::new(15.0, 10.0), Color::RED);
        visu.add_line(Vec2::new(10.0, 10.0), Vec2::new(30.0, 40.0), Color::BLUE);
        visu.add_shape(Shape::circle(Vec2::zero(), 10.0, Color::WHITE, 32));

        visu.flip();
        std::thread::sleep(Duration::from_millis(300));
    }

    log::info!("mouse is over world point {:?}", visu.get_mouse_pos());

    println!("press enter to exit");
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;

    Ok(())
}
