use physics::Galaxy;

/// Receives both galaxies once per frame, after that frame's ticks have run.
pub trait Presenter {
    fn present(&mut self, galaxies: [&Galaxy; 2]);
}

/// Keeps a per-galaxy copy of the position bytes and color, laid out the way a
/// point-sprite vertex buffer and color uniform expect them.
#[derive(Debug, Default)]
pub struct StagingBuffers {
    buffers: [Vec<u8>; 2],
    colors: [[f32; 4]; 2],
    non_finite: [usize; 2],
}

impl StagingBuffers {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn buffer(&self, galaxy: usize) -> &[u8] {
        &self.buffers[galaxy]
    }
    pub fn color(&self, galaxy: usize) -> [f32; 4] {
        self.colors[galaxy]
    }
    pub fn non_finite(&self, galaxy: usize) -> usize {
        self.non_finite[galaxy]
    }
}

impl Presenter for StagingBuffers {
    fn present(&mut self, galaxies: [&Galaxy; 2]) {
        for (i, galaxy) in galaxies.into_iter().enumerate() {
            let buffer = &mut self.buffers[i];
            buffer.clear();
            buffer.extend_from_slice(galaxy.position_bytes());
            self.colors[i] = galaxy.color();

            let non_finite = galaxy.non_finite_stars();
            if non_finite > self.non_finite[i] {
                log::warn!(
                    "Galaxy {}: {} stars escaped to non-finite positions",
                    i,
                    non_finite - self.non_finite[i]
                );
            }
            self.non_finite[i] = non_finite;
        }
    }
}
