use anyhow::Result;

#[cfg(feature = "cli")]
mod main {
    use super::*;
    use anyhow::{Context, anyhow};
    use clap::{Parser, Subcommand};
    use gpu_matrix::{Degrees, Matrix4, Quaternion, Radians, Vector3};

    #[derive(Debug, Parser)]
    #[command(about = "Build and inspect graphics transforms", long_about = None)]
    struct Cli {
        #[command(subcommand)]
        command: Command,
    }

    #[derive(Debug, Subcommand)]
    enum Command {
        /// Print a perspective projection matrix
        Perspective {
            /// Vertical field of view in degrees
            #[arg(long)]
            fov_y: f32,
            /// Width divided by height of the viewport
            #[arg(long)]
            aspect: f32,
            /// Distance to the near plane
            #[arg(long)]
            near: f32,
            /// Distance to the far plane (infinite if omitted)
            #[arg(long)]
            far: Option<f32>,
            /// Map the near plane to depth 1 and the far plane to depth 0
            #[arg(long)]
            reverse_z: bool,
        },
        /// Print an orthographic projection matrix
        Ortho {
            #[arg(long, allow_negative_numbers = true)]
            left: f32,
            #[arg(long, allow_negative_numbers = true)]
            right: f32,
            #[arg(long, allow_negative_numbers = true)]
            bottom: f32,
            #[arg(long, allow_negative_numbers = true)]
            top: f32,
            #[arg(long, allow_negative_numbers = true)]
            near: f32,
            #[arg(long, allow_negative_numbers = true)]
            far: f32,
        },
        /// Print a view matrix for a camera looking at a target
        LookAt {
            /// Camera position as `x,y,z`
            #[arg(long, allow_hyphen_values = true, value_parser = parse_vector3)]
            eye: Vector3,
            /// Point to look at as `x,y,z`
            #[arg(long, allow_hyphen_values = true, value_parser = parse_vector3)]
            target: Vector3,
            /// Up direction as `x,y,z`
            #[arg(long, allow_hyphen_values = true, value_parser = parse_vector3, default_value = "0,1,0")]
            up: Vector3,
        },
        /// Print the quaternion for a set of Euler angles
        Euler {
            /// Rotation about the x-axis in degrees
            #[arg(long, allow_negative_numbers = true, default_value_t = 0.0)]
            x: f32,
            /// Rotation about the y-axis in degrees
            #[arg(long, allow_negative_numbers = true, default_value_t = 0.0)]
            y: f32,
            /// Rotation about the z-axis in degrees
            #[arg(long, allow_negative_numbers = true, default_value_t = 0.0)]
            z: f32,
            /// Composition order, one of xyz, xzy, yxz, yzx, zxy and zyx
            #[arg(long, default_value = "xyz")]
            order: String,
        },
        /// Print the inverse and determinant of a 4x4 matrix
        Invert {
            /// The sixteen elements, row by row
            #[arg(num_args = 16, allow_negative_numbers = true)]
            elements: Vec<f32>,
        },
    }

    pub fn main() -> Result<()> {
        env_logger::init();

        let cli = Cli::parse();

        match cli.command {
            Command::Perspective {
                fov_y,
                aspect,
                near,
                far,
                reverse_z,
            } => {
                let fov_y = Degrees(fov_y).radians();
                let far = far.unwrap_or(f32::INFINITY);
                let projection = if reverse_z {
                    Matrix4::perspective_reverse_z(fov_y, aspect, near, far)
                } else {
                    Matrix4::perspective(fov_y, aspect, near, far)
                };
                print_matrix4(&projection);
            }
            Command::Ortho {
                left,
                right,
                bottom,
                top,
                near,
                far,
            } => {
                print_matrix4(&Matrix4::ortho(left, right, bottom, top, near, far));
            }
            Command::LookAt { eye, target, up } => {
                print_matrix4(&Matrix4::look_at(&eye, &target, &up));
            }
            Command::Euler { x, y, z, order } => {
                let rotation = Quaternion::from_euler_str(
                    Degrees(x).radians(),
                    Degrees(y).radians(),
                    Degrees(z).radians(),
                    &order,
                )
                .context("Invalid Euler angles")?;
                let [qx, qy, qz, qw] = *rotation.as_array();
                println!("{qx} {qy} {qz} {qw}");

                let (angle, axis) = rotation.to_axis_angle();
                println!(
                    "axis-angle: {} deg about {} {} {}",
                    Radians(angle).degrees(),
                    axis.x(),
                    axis.y(),
                    axis.z()
                );
            }
            Command::Invert { elements } => {
                let elements: [f32; 16] = elements
                    .try_into()
                    .map_err(|elements: Vec<f32>| {
                        anyhow!("Expected 16 matrix elements, got {}", elements.len())
                    })?;
                let matrix = Matrix4::from_array(elements);
                let determinant = matrix.determinant();
                log::debug!("Inverting matrix with determinant {determinant}");
                print_matrix4(&matrix.inverted());
                println!("determinant: {determinant}");
            }
        }

        Ok(())
    }

    fn parse_vector3(s: &str) -> Result<Vector3> {
        let components = s
            .split(',')
            .map(|component| {
                component
                    .trim()
                    .parse::<f32>()
                    .with_context(|| format!("Invalid vector component `{component}`"))
            })
            .collect::<Result<Vec<_>>>()?;

        match components[..] {
            [x, y, z] => Ok(Vector3::new(x, y, z)),
            _ => Err(anyhow!(
                "Expected three comma-separated components, got {}",
                components.len()
            )),
        }
    }

    fn print_matrix4(matrix: &Matrix4) {
        for row in matrix.as_array().chunks_exact(4) {
            println!("{:>12.6} {:>12.6} {:>12.6} {:>12.6}", row[0], row[1], row[2], row[3]);
        }
    }
}

#[cfg(not(feature = "cli"))]
mod main {
    use super::*;

    pub fn main() -> Result<()> {
        anyhow::bail!("This binary requires the `cli` feature to be enabled.")
    }
}

fn main() -> Result<()> {
    main::main()
}
