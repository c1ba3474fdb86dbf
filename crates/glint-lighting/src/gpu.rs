//! Lighting backend selection: optional shader path with a permanent CPU fallback

use crate::light::{LightAggregator, LightSource, MAX_LIGHTS};
use bytemuck::{Pod, Zeroable};
use glint_core::Result;
use glint_render::Canvas;

/// Packed light for a host shader.
/// 32 bytes, two vec4 rows.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct LightInstance {
    /// xy = center, z = radius, w = intensity
    pub center_radius: [f32; 4],
    /// rgb, a unused
    pub color: [f32; 4],
}

impl LightInstance {
    pub fn from_light(light: &LightSource) -> Self {
        Self {
            center_radius: [
                light.position.x,
                light.position.y,
                light.radius,
                light.intensity,
            ],
            color: [light.color.r, light.color.g, light.color.b, 1.0],
        }
    }
}

/// Host-provided GPU lighting capability. Shader compilation is the host's
/// business; the core only asks whether it worked.
pub trait LightingShader {
    /// Compile/link once. An error routes every later frame to the CPU path.
    fn initialize(&mut self) -> Result<()>;

    fn draw(&mut self, instances: &[LightInstance]) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightingBackend {
    Shader,
    Cpu,
}

/// Draws the aggregated lights through the shader when available, otherwise
/// as CPU radial gradients. The shader is probed once; after any failure it is
/// dropped and never retried.
pub struct LightingRenderer {
    shader: Option<Box<dyn LightingShader>>,
    instances: [LightInstance; MAX_LIGHTS],
}

impl Default for LightingRenderer {
    fn default() -> Self {
        Self::cpu()
    }
}

impl LightingRenderer {
    pub fn cpu() -> Self {
        Self {
            shader: None,
            instances: [LightInstance::zeroed(); MAX_LIGHTS],
        }
    }

    pub fn with_shader(mut shader: Box<dyn LightingShader>) -> Self {
        let mut renderer = Self::cpu();
        match shader.initialize() {
            Ok(()) => {
                log::info!("lighting shader ready");
                renderer.shader = Some(shader);
            }
            Err(e) => log::warn!("lighting shader unavailable, using CPU gradients: {e}"),
        }
        renderer
    }

    pub fn backend(&self) -> LightingBackend {
        if self.shader.is_some() {
            LightingBackend::Shader
        } else {
            LightingBackend::Cpu
        }
    }

    pub fn render(&mut self, lights: &mut LightAggregator, canvas: &mut dyn Canvas) {
        if let Some(shader) = self.shader.as_mut() {
            let count = lights.pack_instances(&mut self.instances);
            match shader.draw(&self.instances[..count]) {
                Ok(()) => return,
                Err(e) => {
                    log::warn!("lighting shader failed, switching to CPU gradients: {e}");
                    self.shader = None;
                }
            }
        }
        lights.render(canvas);
    }
}

impl LightAggregator {
    /// Pack visible lights into `out`, returning how many were written
    pub fn pack_instances(&self, out: &mut [LightInstance; MAX_LIGHTS]) -> usize {
        let mut n = 0;
        for light in self.lights().iter().filter(|l| l.is_visible()) {
            out[n] = LightInstance::from_light(light);
            n += 1;
        }
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use glint_core::{Color, GlintError};
    use glint_render::RecordingCanvas;
    use std::cell::Cell;
    use std::rc::Rc;

    struct MockShader {
        init_ok: bool,
        fail_draw: bool,
        draws: Rc<Cell<usize>>,
        last_count: Rc<Cell<usize>>,
    }

    impl LightingShader for MockShader {
        fn initialize(&mut self) -> Result<()> {
            if self.init_ok {
                Ok(())
            } else {
                Err(GlintError::ShaderError("no compute support".into()))
            }
        }

        fn draw(&mut self, instances: &[LightInstance]) -> Result<()> {
            self.draws.set(self.draws.get() + 1);
            self.last_count.set(instances.len());
            if self.fail_draw {
                Err(GlintError::ShaderError("device lost".into()))
            } else {
                Ok(())
            }
        }
    }

    fn mock(init_ok: bool, fail_draw: bool) -> (Box<MockShader>, Rc<Cell<usize>>, Rc<Cell<usize>>) {
        let draws = Rc::new(Cell::new(0));
        let last = Rc::new(Cell::new(0));
        let shader = Box::new(MockShader {
            init_ok,
            fail_draw,
            draws: Rc::clone(&draws),
            last_count: Rc::clone(&last),
        });
        (shader, draws, last)
    }

    fn two_lights() -> LightAggregator {
        let mut lights = LightAggregator::new();
        lights.add_light(Vec2::new(1.0, 2.0), 10.0, Color::WHITE, 0.5);
        lights.add_light(Vec2::ZERO, 10.0, Color::WHITE, 0.0);
        lights
    }

    #[test]
    fn instance_layout() {
        assert_eq!(std::mem::size_of::<LightInstance>(), 32);
        let packed = [LightInstance::zeroed(); 3];
        assert_eq!(bytemuck::cast_slice::<LightInstance, u8>(&packed).len(), 96);
    }

    #[test]
    fn shader_path_skips_canvas() {
        let (shader, draws, last) = mock(true, false);
        let mut renderer = LightingRenderer::with_shader(shader);
        assert_eq!(renderer.backend(), LightingBackend::Shader);

        let mut lights = two_lights();
        let mut canvas = RecordingCanvas::new();
        renderer.render(&mut lights, &mut canvas);
        assert!(canvas.is_empty());
        assert_eq!(draws.get(), 1);
        // invisible light filtered out
        assert_eq!(last.get(), 1);
    }

    #[test]
    fn failed_init_falls_back_to_cpu() {
        let (shader, draws, _) = mock(false, false);
        let mut renderer = LightingRenderer::with_shader(shader);
        assert_eq!(renderer.backend(), LightingBackend::Cpu);

        let mut lights = two_lights();
        let mut canvas = RecordingCanvas::new();
        renderer.render(&mut lights, &mut canvas);
        assert_eq!(canvas.len(), 1);
        assert_eq!(draws.get(), 0);
    }

    #[test]
    fn draw_failure_switches_permanently() {
        let (shader, draws, _) = mock(true, true);
        let mut renderer = LightingRenderer::with_shader(shader);
        let mut lights = two_lights();

        let mut canvas = RecordingCanvas::new();
        renderer.render(&mut lights, &mut canvas);
        assert_eq!(canvas.len(), 1);
        assert_eq!(renderer.backend(), LightingBackend::Cpu);

        canvas.clear();
        renderer.render(&mut lights, &mut canvas);
        assert_eq!(canvas.len(), 1);
        assert_eq!(draws.get(), 1);
    }

    #[test]
    fn pack_matches_light_fields() {
        let lights = two_lights();
        let mut out = [LightInstance::zeroed(); MAX_LIGHTS];
        assert_eq!(lights.pack_instances(&mut out), 1);
        assert_eq!(out[0].center_radius, [1.0, 2.0, 10.0, 0.5]);
        assert_eq!(out[0].color, [1.0, 1.0, 1.0, 1.0]);
    }
}
