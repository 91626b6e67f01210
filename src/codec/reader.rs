pub mod host;
pub mod ppm;
pub mod project;
pub mod tokenizer;

/// accumulates the components of one pixel while parsing
#[derive(Clone, Copy)]
struct Dot<const N: usize> {
    buffer: [u16; N],
    index: usize,
}

impl<const N: usize> Dot<N> {
    fn new() -> Self {
        Self {
            buffer: [u16::default(); N],
            index: 0,
        }
    }

    fn component(&self, index: usize) -> u16 {
        self.buffer[index]
    }

    fn push_color_component(&mut self, component: u16) {
        if self.is_complete() {
            return;
        }
        self.buffer[self.index] = component;
        self.index += 1;
    }

    fn is_complete(&self) -> bool {
        self.index == N
    }

    fn is_empty(&self) -> bool {
        self.index == 0
    }

    fn reset(&mut self) {
        self.index = 0;
    }
}
