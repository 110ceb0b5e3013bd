//! Presentation of composed frames.
//!
//! - `context` owns the wgpu instance, device and surface and reconfigures the
//!   swapchain when the window resizes.
//! - `pipeline` holds the full-screen blit and the frame texture it samples.
//!
//! Everything visible is drawn on the CPU into one RGBA frame; the GPU only
//! uploads that frame and stretches it over the surface.

mod context;
mod pipeline;

use anyhow::Result;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use winit::dpi::PhysicalSize;

use artworks::Canvas;

use context::GpuContext;
use pipeline::{FramePipeline, FrameTexture};

pub(crate) struct GpuState {
    context: GpuContext,
    pipeline: FramePipeline,
    frame: FrameTexture,
}

impl GpuState {
    pub(crate) fn new<T>(target: &T, size: PhysicalSize<u32>) -> Result<Self>
    where
        T: HasDisplayHandle + HasWindowHandle,
    {
        let context = GpuContext::new(target, size)?;
        let pipeline = FramePipeline::new(
            &context.device,
            context.surface_format,
            context.color_space.frame_format(),
        );
        let frame = pipeline.create_texture(&context.device, context.size.width, context.size.height);
        Ok(Self {
            context,
            pipeline,
            frame,
        })
    }

    /// Surface size after clamping to the device limits.
    pub(crate) fn size(&self) -> PhysicalSize<u32> {
        self.context.size
    }

    pub(crate) fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.context.resize(new_size);
    }

    pub(crate) fn reconfigure(&mut self) {
        self.context.reconfigure();
    }

    pub(crate) fn render(&mut self, frame: &Canvas) -> Result<(), wgpu::SurfaceError> {
        if !self.frame.matches(frame.width(), frame.height()) {
            self.frame = self
                .pipeline
                .create_texture(&self.context.device, frame.width(), frame.height());
        }
        self.frame.upload(&self.context.queue, frame.as_raw());

        let output = self.context.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder =
            self.context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("frame encoder"),
                });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("frame pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            render_pass.set_pipeline(self.pipeline.pipeline());
            render_pass.set_bind_group(0, self.frame.bind_group(), &[]);
            render_pass.draw(0..3, 0..1);
        }

        self.context.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }
}
