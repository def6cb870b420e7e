use rayon::prelude::*;
use serde::{Serialize, Deserialize};

use crate::error::HalaBurnfadeError;
use crate::scene::HalaVertex;
use crate::burn::HalaBurnParams;

/// The kernel entry point, run once per vertex.
pub type HalaVertexKernel = fn(&HalaVertex, &HalaBurnParams) -> HalaVertex;

/// The compute program description.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HalaComputeProgramDesc {
  /// The worker count, 0 lets rayon pick one per logical core.
  pub num_threads: usize,
  /// The number of vertices handled by one work item.
  pub workgroup_size: u32,
}

impl Default for HalaComputeProgramDesc {
  fn default() -> Self {
    Self {
      num_threads: 0,
      workgroup_size: 64,
    }
  }
}

/// The compute program.
pub struct HalaComputeProgram {
  name: String,
  pool: rayon::ThreadPool,
  kernel: HalaVertexKernel,
  workgroup_size: usize,
}

/// The Drop implementation of the compute program.
impl Drop for HalaComputeProgram {
  fn drop(&mut self) {
    log::debug!("A HalaComputeProgram \"{}\" is dropped.", self.name);
  }
}

/// The compute program implementation.
impl HalaComputeProgram {

  /// Create a new compute program.
  /// param desc: The compute program description.
  /// param kernel: The kernel entry point.
  /// param debug_name: The debug name.
  /// return: The compute program.
  pub fn new(
    desc: &HalaComputeProgramDesc,
    kernel: HalaVertexKernel,
    debug_name: &str,
  ) -> Result<Self, HalaBurnfadeError> {
    if desc.workgroup_size == 0 {
      return Err(HalaBurnfadeError::new(
        &format!("The workgroup size of the compute program \"{}\" must not be zero.", debug_name),
        None));
    }

    let thread_prefix = debug_name.to_string();
    let pool = rayon::ThreadPoolBuilder::new()
      .num_threads(desc.num_threads)
      .thread_name(move |index| format!("{}.compute_{}", thread_prefix, index))
      .build()?;

    log::debug!(
      "A HalaComputeProgram \"{}\"[{} threads, workgroup {}] is created.",
      debug_name, pool.current_num_threads(), desc.workgroup_size
    );
    Ok(Self {
      name: debug_name.to_string(),
      pool,
      kernel,
      workgroup_size: desc.workgroup_size as usize,
    })
  }

  pub fn get_workgroup_size(&self) -> usize {
    self.workgroup_size
  }

  pub fn get_num_threads(&self) -> usize {
    self.pool.current_num_threads()
  }

  /// Get the number of workgroups needed to cover the vertices.
  /// param vertex_count: The vertex count.
  /// return: The group count.
  pub fn group_count(&self, vertex_count: usize) -> usize {
    vertex_count.div_ceil(self.workgroup_size)
  }

  /// Dispatch the kernel once per vertex.
  /// Invocations are independent and run in any order on the program's pool.
  /// param input: The source vertices.
  /// param output: The destination vertices, same length as the source.
  /// param params: The burn parameters.
  /// return: The result.
  pub fn dispatch(
    &self,
    input: &[HalaVertex],
    output: &mut [HalaVertex],
    params: &HalaBurnParams,
  ) -> Result<(), HalaBurnfadeError> {
    if input.len() != output.len() {
      return Err(HalaBurnfadeError::new(
        &format!(
          "The compute program \"{}\" got {} source vertices for {} destination vertices.",
          self.name, input.len(), output.len()),
        None));
    }

    let kernel = self.kernel;
    let workgroup_size = self.workgroup_size;
    self.pool.install(|| {
      output.par_chunks_mut(workgroup_size)
        .zip(input.par_chunks(workgroup_size))
        .for_each(|(dst_group, src_group)| {
          for (dst, src) in dst_group.iter_mut().zip(src_group) {
            *dst = kernel(src, params);
          }
        });
    });
    Ok(())
  }

}

#[cfg(test)]
mod tests {
  use glam::Vec3;

  use super::*;

  fn lift(vertex: &HalaVertex, params: &HalaBurnParams) -> HalaVertex {
    let mut out = *vertex;
    out.position += Vec3::Y * params.progress;
    out
  }

  #[test]
  fn every_vertex_gets_one_invocation() {
    let desc = HalaComputeProgramDesc { num_threads: 3, workgroup_size: 7 };
    let program = HalaComputeProgram::new(&desc, lift, "lift").unwrap();
    assert_eq!(program.get_num_threads(), 3);
    assert_eq!(program.group_count(100), 15);
    assert_eq!(program.group_count(0), 0);

    let input: Vec<HalaVertex> = (0..100)
      .map(|i| HalaVertex { position: Vec3::X * i as f32, ..Default::default() })
      .collect();
    let mut output = vec![HalaVertex::default(); input.len()];
    let params = HalaBurnParams { progress: 2.0, ..Default::default() };
    program.dispatch(&input, &mut output, &params).unwrap();

    for (i, vertex) in output.iter().enumerate() {
      assert_eq!(vertex.position, Vec3::new(i as f32, 2.0, 0.0));
    }
  }

  #[test]
  fn mismatched_buffers_are_rejected() {
    let program = HalaComputeProgram::new(&HalaComputeProgramDesc::default(), lift, "lift").unwrap();
    let input = vec![HalaVertex::default(); 4];
    let mut output = vec![HalaVertex::default(); 3];
    assert!(program.dispatch(&input, &mut output, &HalaBurnParams::default()).is_err());
  }

  #[test]
  fn zero_workgroup_is_rejected() {
    let desc = HalaComputeProgramDesc { workgroup_size: 0, ..Default::default() };
    assert!(HalaComputeProgram::new(&desc, lift, "lift").is_err());
  }
}
