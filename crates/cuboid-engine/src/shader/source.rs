use naga::valid::{Capabilities, ValidationFlags, Validator};

use super::error::{ShaderError, Stage};
use super::interface::{self, ProgramInterface};

/// Fixed shader program description.
///
/// Treated as constant configuration: the built-in program is
/// [`ShaderSources::CUBE`], and nothing mutates sources after startup.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ShaderSources {
    pub vertex: &'static str,
    pub fragment: &'static str,
    pub vertex_entry: &'static str,
    pub fragment_entry: &'static str,
}

impl ShaderSources {
    pub const CUBE: ShaderSources = ShaderSources {
        vertex: include_str!("shaders/cube_vs.wgsl"),
        fragment: include_str!("shaders/cube_fs.wgsl"),
        vertex_entry: "vs_main",
        fragment_entry: "fs_main",
    };

    /// Compiles both stages and checks that they link into a usable program.
    ///
    /// This runs on the CPU before any GPU object is created, so a bad shader
    /// surfaces as an error with a readable diagnostic rather than a device
    /// validation panic.
    pub fn compile(&self) -> Result<ShaderProgram, ShaderError> {
        let vertex = compile_stage(Stage::Vertex, self.vertex)?;
        let fragment = compile_stage(Stage::Fragment, self.fragment)?;

        let interface = interface::link(
            &vertex,
            self.vertex_entry,
            &fragment,
            self.fragment_entry,
        )?;

        log::debug!(
            "shader program linked: {} varyings, uniform `{}`",
            interface.varyings.len(),
            interface::TRANSFORM_UNIFORM
        );

        Ok(ShaderProgram {
            sources: *self,
            interface,
        })
    }
}

impl Default for ShaderSources {
    fn default() -> Self {
        Self::CUBE
    }
}

/// Sources that passed compile + link, with their reflected interface.
#[derive(Debug, Clone)]
pub struct ShaderProgram {
    pub sources: ShaderSources,
    pub interface: ProgramInterface,
}

fn compile_stage(stage: Stage, source: &str) -> Result<naga::Module, ShaderError> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| ShaderError::Compile {
        stage,
        diagnostic: e.emit_to_string(source),
    })?;

    Validator::new(ValidationFlags::all(), Capabilities::default())
        .validate(&module)
        .map_err(|e| ShaderError::Compile {
            stage,
            diagnostic: e.emit_to_string(source),
        })?;

    Ok(module)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VS_NO_UNIFORM: &str = "
        @vertex
        fn vs_main(@location(0) p: vec3<f32>) -> @builtin(position) vec4<f32> {
            return vec4<f32>(p, 1.0);
        }
    ";

    #[test]
    fn builtin_program_compiles_and_links() {
        let program = ShaderSources::CUBE.compile().expect("built-in shaders must link");
        assert_eq!(program.sources, ShaderSources::CUBE);
        assert_eq!(program.interface.varyings, vec![0]);
    }

    #[test]
    fn syntax_error_is_a_vertex_compile_error() {
        let src = ShaderSources {
            vertex: "@vertex fn vs_main( -> @builtin(position) vec4<f32> {}",
            ..ShaderSources::CUBE
        };
        let err = src.compile().unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Vertex));
        let ShaderError::Compile { diagnostic, .. } = err else { unreachable!() };
        assert!(!diagnostic.is_empty());
    }

    #[test]
    fn type_error_is_a_fragment_compile_error() {
        let src = ShaderSources {
            fragment: "
                @fragment
                fn fs_main(@location(0) c: vec3<f32>) -> @location(0) vec4<f32> {
                    return c;
                }
            ",
            ..ShaderSources::CUBE
        };
        let err = src.compile().unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Fragment));
    }

    #[test]
    fn missing_transform_uniform_fails_to_link() {
        let src = ShaderSources { vertex: VS_NO_UNIFORM, ..ShaderSources::CUBE };
        let err = src.compile().unwrap_err();
        assert!(matches!(err, ShaderError::Link { .. }), "{err}");
        assert!(err.to_string().contains("transform"));
    }

    #[test]
    fn wrong_entry_point_fails_to_link() {
        let src = ShaderSources { fragment_entry: "main", ..ShaderSources::CUBE };
        let err = src.compile().unwrap_err();
        assert!(err.to_string().contains("`main`"), "{err}");
    }

    #[test]
    fn varying_type_mismatch_fails_to_link() {
        let src = ShaderSources {
            fragment: "
                @fragment
                fn fs_main(@location(0) c: vec4<f32>) -> @location(0) vec4<f32> {
                    return c;
                }
            ",
            ..ShaderSources::CUBE
        };
        let err = src.compile().unwrap_err();
        assert!(matches!(err, ShaderError::Link { .. }), "{err}");
    }

    #[test]
    fn unfed_fragment_input_fails_to_link() {
        let src = ShaderSources {
            fragment: "
                @fragment
                fn fs_main(@location(3) c: vec3<f32>) -> @location(0) vec4<f32> {
                    return vec4<f32>(c, 1.0);
                }
            ",
            ..ShaderSources::CUBE
        };
        let err = src.compile().unwrap_err();
        assert!(err.to_string().contains("location 3"), "{err}");
    }
}
