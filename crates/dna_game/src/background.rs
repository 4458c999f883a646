use dna_core::draw::{Color, DrawList};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Channel {
    value: u8,
    rising: bool,
}

impl Channel {
    fn step(&mut self) {
        if self.value == u8::MAX {
            self.rising = false;
        } else if self.value == 0 {
            self.rising = true;
        }
        self.value = if self.rising {
            self.value.saturating_add(1)
        } else {
            self.value.saturating_sub(1)
        };
    }
}

/// Full-screen fill whose red, green and blue channels each sweep up and
/// down between 0 and 255, one step per frame.
#[derive(Debug, Clone)]
pub struct ColourChangingBackground {
    channels: [Channel; 3],
}

impl ColourChangingBackground {
    pub fn new(rng: &mut impl Rng) -> Self {
        Self::from_rgb([rng.random::<u8>(), rng.random::<u8>(), rng.random::<u8>()])
    }

    pub fn from_rgb(rgb: [u8; 3]) -> Self {
        Self {
            channels: rgb.map(|value| Channel {
                value,
                rising: true,
            }),
        }
    }

    pub fn colour(&self) -> Color {
        let [r, g, b] = self.channels.map(|c| c.value);
        Color::rgb(r, g, b)
    }

    pub fn update(&mut self) {
        for channel in &mut self.channels {
            channel.step();
        }
    }

    pub fn draw(&self, out: &mut DrawList) {
        out.fill(self.colour());
    }
}
