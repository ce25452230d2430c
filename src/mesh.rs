//! VAO/VBO/EBO ownership wrappers for the hardcoded demo geometry.
//!
//! Position-only vertices, three floats each, attribute location 0,
//! uploaded once with `STATIC_DRAW`. All objects are deleted on drop.

use gl::types::*;
use std::mem;
use std::ptr;

pub struct Mesh {
    vao: GLuint,
    vbo: GLuint,
    ebo: Option<GLuint>,
    count: GLsizei,
}

impl Mesh {
    /// Uploads a flat position array drawn with `DrawArrays`.
    pub fn new(vertices: &[f32]) -> Self {
        Self::build(vertices, None)
    }

    /// Uploads positions plus an element buffer drawn with `DrawElements`.
    pub fn with_indices(vertices: &[f32], indices: &[u32]) -> Self {
        Self::build(vertices, Some(indices))
    }

    fn build(vertices: &[f32], indices: Option<&[u32]>) -> Self {
        let mut vao = 0;
        let mut vbo = 0;

        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::GenBuffers(1, &mut vbo);

            gl::BindVertexArray(vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                (vertices.len() * mem::size_of::<f32>()) as GLsizeiptr,
                vertices.as_ptr() as *const _,
                gl::STATIC_DRAW,
            );
        }

        let ebo = indices.map(|indices| {
            let mut ebo = 0;
            unsafe {
                gl::GenBuffers(1, &mut ebo);
                gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, ebo);
                gl::BufferData(
                    gl::ELEMENT_ARRAY_BUFFER,
                    (indices.len() * mem::size_of::<u32>()) as GLsizeiptr,
                    indices.as_ptr() as *const _,
                    gl::STATIC_DRAW,
                );
            }
            ebo
        });

        unsafe {
            gl::VertexAttribPointer(
                0,
                3,
                gl::FLOAT,
                gl::FALSE,
                3 * mem::size_of::<f32>() as GLsizei,
                ptr::null(),
            );
            gl::EnableVertexAttribArray(0);

            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
            gl::BindVertexArray(0);
        }

        let count = match indices {
            Some(indices) => indices.len(),
            None => vertices.len() / 3,
        } as GLsizei;

        Self {
            vao,
            vbo,
            ebo,
            count,
        }
    }

    pub fn draw(&self) {
        unsafe {
            gl::BindVertexArray(self.vao);
            match self.ebo {
                Some(_) => gl::DrawElements(gl::TRIANGLES, self.count, gl::UNSIGNED_INT, ptr::null()),
                None => gl::DrawArrays(gl::TRIANGLES, 0, self.count),
            }
            gl::BindVertexArray(0);
        }
    }
}

impl Drop for Mesh {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteVertexArrays(1, &self.vao);
            gl::DeleteBuffers(1, &self.vbo);
            if let Some(ebo) = self.ebo {
                gl::DeleteBuffers(1, &ebo);
            }
        }
    }
}
