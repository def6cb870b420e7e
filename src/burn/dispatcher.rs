use std::sync::Arc;

use crate::error::HalaBurnfadeError;
use crate::compute_program::{
  HalaComputeProgram,
  HalaComputeProgramDesc,
};
use crate::scene::HalaVertex;
use crate::scene::cpu::HalaMesh;
use crate::scene::gpu::HalaMeshBuffers;
use super::kernel::burn_vertex;
use super::params::HalaBurnParams;
use super::rest_pose::HalaRestPose;

/// The burn effect dispatcher.
/// It owns the compute program, the rest pose and the rotating output buffers.
pub struct HalaBurnDispatcher {
  program: HalaComputeProgram,
  rest_pose: Option<HalaRestPose>,
  buffers: [Option<Arc<[HalaVertex]>>; 2],
  front: usize,
  total_dispatches: u64,
}

/// The Drop implementation of the dispatcher.
impl Drop for HalaBurnDispatcher {
  fn drop(&mut self) {
    log::debug!("A HalaBurnDispatcher is dropped after {} dispatches.", self.total_dispatches);
  }
}

/// The implementation of the dispatcher.
impl HalaBurnDispatcher {

  /// Create a new dispatcher.
  /// A failure here means the effect can not run at all.
  /// param desc: The compute program description.
  /// return: The dispatcher.
  pub fn new(desc: &HalaComputeProgramDesc) -> Result<Self, HalaBurnfadeError> {
    let program = HalaComputeProgram::new(desc, burn_vertex, "burn_fade")?;
    Ok(Self {
      program,
      rest_pose: None,
      buffers: [None, None],
      front: 0,
      total_dispatches: 0,
    })
  }

  pub fn program(&self) -> &HalaComputeProgram {
    &self.program
  }

  pub fn rest_pose(&self) -> Option<&HalaRestPose> {
    self.rest_pose.as_ref()
  }

  pub fn is_ready(&self) -> bool {
    self.rest_pose.as_ref().is_some_and(|rest_pose| !rest_pose.is_empty())
  }

  /// Capture the rest pose of the mesh and present it as the initial buffer.
  /// Capturing again replaces the previous rest pose.
  /// param mesh: The generated mesh.
  /// return: The result.
  pub fn capture_rest_pose(&mut self, mesh: &HalaMesh) -> Result<(), HalaBurnfadeError> {
    let rest_pose = HalaRestPose::capture(mesh)?;
    if let Some(previous) = self.rest_pose.as_ref() {
      log::warn!(
        "The rest pose of {} vertices is replaced by a new one of {} vertices.",
        previous.len(), rest_pose.len()
      );
    }

    self.buffers = [Some(rest_pose.shared()), None];
    self.front = 0;
    self.rest_pose = Some(rest_pose);
    Ok(())
  }

  /// Run the burn kernel over a rest pose into a freshly allocated buffer.
  /// An empty rest pose is not ready yet, nothing is produced.
  /// param rest_pose: The rest pose.
  /// param params: The burn parameters, rejected if invalid.
  /// return: The new vertex buffer.
  pub fn apply(
    &self,
    rest_pose: &HalaRestPose,
    params: HalaBurnParams,
  ) -> Result<Option<Vec<HalaVertex>>, HalaBurnfadeError> {
    params.validate()?;
    if rest_pose.is_empty() {
      return Ok(None);
    }
    let mut output = vec![HalaVertex::default(); rest_pose.len()];
    self.program.dispatch(rest_pose.vertices(), &mut output, &params)?;
    Ok(Some(output))
  }

  /// Run one update of the effect and present the result.
  /// The presented buffer is swapped only after the whole dispatch completes.
  /// Invalid parameters are rejected and the presented buffer is kept.
  /// param params: The burn parameters.
  /// return: The presented buffer, or None before the rest pose is captured.
  pub fn update(&mut self, params: HalaBurnParams) -> Result<Option<Arc<[HalaVertex]>>, HalaBurnfadeError> {
    params.validate()?;
    let Some(rest_pose) = self.rest_pose.as_ref().filter(|rest_pose| !rest_pose.is_empty()) else {
      log::trace!("Skip the burn update, the rest pose is not captured yet.");
      return Ok(None);
    };

    // Reuse the back buffer only when no reader holds it any more.
    let back = 1 - self.front;
    let mut target = match self.buffers[back].take() {
      Some(buffer) if buffer.len() == rest_pose.len() && Arc::strong_count(&buffer) == 1 => buffer,
      _ => Arc::from(vec![HalaVertex::default(); rest_pose.len()]),
    };
    let Some(output) = Arc::get_mut(&mut target) else {
      return Err(HalaBurnfadeError::new("The burn back buffer is still shared.", None));
    };
    self.program.dispatch(rest_pose.vertices(), output, &params)?;

    self.buffers[back] = Some(Arc::clone(&target));
    self.front = back;
    self.total_dispatches += 1;
    Ok(Some(target))
  }

  /// Get the presented buffer.
  /// return: The buffer, or None before the rest pose is captured.
  pub fn presented(&self) -> Option<Arc<[HalaVertex]>> {
    self.buffers[self.front].clone()
  }

  /// Run one update and replace the vertex buffer of the render mesh.
  /// param params: The burn parameters.
  /// param mesh_buffers: The render mesh buffers.
  /// return: True if the mesh buffers were replaced.
  pub fn update_mesh_buffers(
    &mut self,
    params: HalaBurnParams,
    mesh_buffers: &mut HalaMeshBuffers,
  ) -> Result<bool, HalaBurnfadeError> {
    match self.update(params)? {
      Some(vertices) => {
        mesh_buffers.replace_vertices(&vertices)?;
        Ok(true)
      },
      None => Ok(false),
    }
  }

}
