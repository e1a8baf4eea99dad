use nestgen_core::config::{GenerationOptions, Language, TransportKind};
use nestgen_core::plan::plan_resource;
use nestgen_core::{GeneratedFile, materialize};
use nestgen_typescript::{NestRenderer, RenderError};

fn generate(options: GenerationOptions) -> Vec<GeneratedFile> {
    let manifest = plan_resource(&options).unwrap();
    let renderer = NestRenderer::new().unwrap();
    materialize(&manifest, &renderer).unwrap()
}

fn content<'a>(files: &'a [GeneratedFile], path: &str) -> &'a str {
    files
        .iter()
        .find(|f| f.path == path)
        .map(|f| f.content.as_str())
        .unwrap_or_else(|| panic!("no file {path}"))
}

fn with_kind(name: &str, kind: TransportKind) -> GenerationOptions {
    GenerationOptions {
        kind,
        ..GenerationOptions::new(name)
    }
}

#[test]
fn rest_controller() {
    let files = generate(GenerationOptions::new("users"));
    assert_eq!(
        content(&files, "users/users.controller.ts"),
        r#"import { Controller, Get, Post, Body, Patch, Param, Delete } from '@nestjs/common';
import { UsersService } from './users.service';
import { CreateUserDto } from './input/create-user.dto';
import { UpdateUserDto } from './input/update-user.dto';

@Controller('users')
export class UsersController {
  constructor(private readonly usersService: UsersService) {}

  @Post()
  create(@Body() createUserDto: CreateUserDto) {
    return this.usersService.create(createUserDto);
  }

  @Get()
  findAll() {
    return this.usersService.findAll();
  }

  @Get(':id')
  findOne(@Param('id') id: string) {
    return this.usersService.findOne(+id);
  }

  @Patch(':id')
  update(@Param('id') id: string, @Body() updateUserDto: UpdateUserDto) {
    return this.usersService.update(+id, updateUserDto);
  }

  @Delete(':id')
  remove(@Param('id') id: string) {
    return this.usersService.remove(+id);
  }
}
"#
    );
}

#[test]
fn rest_module() {
    let files = generate(GenerationOptions::new("users"));
    assert_eq!(
        content(&files, "users/users.module.ts"),
        r#"import { Module } from '@nestjs/common';

import { UsersController } from './users.controller';
import { UsersService } from './users.service';

@Module({
  controllers: [UsersController],
  providers: [UsersService],
})
export class UsersModule {}
"#
    );
}

#[test]
fn rest_without_crud_is_minimal() {
    let files = generate(GenerationOptions {
        crud: false,
        spec: false,
        ..GenerationOptions::new("users")
    });
    assert_eq!(files.len(), 4);
    assert_eq!(
        content(&files, "users/users.controller.ts"),
        r#"import { Controller } from '@nestjs/common';
import { UsersService } from './users.service';

@Controller('users')
export class UsersController {
  constructor(private readonly usersService: UsersService) {}
}
"#
    );
    assert_eq!(
        content(&files, "users/users.service.ts"),
        r#"import { Injectable } from '@nestjs/common';

@Injectable()
export class UsersService {}
"#
    );
    assert_eq!(
        content(&files, "users/args/user.args.ts"),
        "export class UserArgs {}\n"
    );
}

#[test]
fn rest_service_stub() {
    let files = generate(GenerationOptions::new("users"));
    let service = content(&files, "users/users.service.ts");
    assert!(service.contains("export class UsersService {"));
    assert!(service.contains("create(createUserDto: CreateUserDto) {"));
    assert!(service.contains("return 'This action adds a new user';"));
    assert!(service.contains("return `This action returns all users`;"));
    assert!(service.contains("return `This action removes a #${id} user`;"));
}

#[test]
fn update_dto_uses_swagger_when_installed() {
    let files = generate(GenerationOptions {
        is_swagger_installed: true,
        ..GenerationOptions::new("users")
    });
    assert_eq!(
        content(&files, "users/input/update-user.dto.ts"),
        r#"import { PartialType } from '@nestjs/swagger';
import { CreateUserDto } from './create-user.dto';

export class UpdateUserDto extends PartialType(CreateUserDto) {}
"#
    );
}

#[test]
fn update_dto_uses_mapped_types_without_swagger() {
    let files = generate(GenerationOptions::new("users"));
    let dto = content(&files, "users/input/update-user.dto.ts");
    assert!(dto.starts_with("import { PartialType } from '@nestjs/mapped-types';\n"));
    assert!(!dto.contains("id: number"));
}

#[test]
fn message_transport_update_dto_uses_swagger_when_installed() {
    for kind in [TransportKind::Microservice, TransportKind::Ws] {
        let files = generate(GenerationOptions {
            kind,
            is_swagger_installed: true,
            ..GenerationOptions::new("users")
        });
        assert_eq!(
            content(&files, "users/input/update-user.dto.ts"),
            r#"import { PartialType } from '@nestjs/swagger';
import { CreateUserDto } from './create-user.dto';

export class UpdateUserDto extends PartialType(CreateUserDto) {
  id: number;
}
"#,
            "{kind}"
        );
    }
}

#[test]
fn schema_first_update_input_ignores_swagger() {
    let files = generate(GenerationOptions {
        kind: TransportKind::GraphqlSchemaFirst,
        is_swagger_installed: true,
        ..GenerationOptions::new("users")
    });
    let input = content(&files, "users/input/update-user.input.ts");
    assert!(input.starts_with("import { PartialType } from '@nestjs/mapped-types';\n"));
    assert!(input.contains("  id: string;\n"));
}

#[test]
fn microservice_controller_uses_message_patterns() {
    let files = generate(with_kind("users", TransportKind::Microservice));
    let controller = content(&files, "users/users.controller.ts");
    assert!(controller.contains("import { MessagePattern, Payload } from '@nestjs/microservices';"));
    assert!(controller.contains("@Controller()\n"));
    assert!(controller.contains("@MessagePattern('createUser')"));
    assert!(controller.contains("@MessagePattern('findAllUsers')"));
    assert!(controller.contains("return this.usersService.update(updateUserDto.id, updateUserDto);"));

    let dto = content(&files, "users/input/update-user.dto.ts");
    assert!(dto.contains("from '@nestjs/mapped-types'"));
    assert!(dto.contains("  id: number;\n"));
}

#[test]
fn ws_gateway_and_module() {
    let files = generate(with_kind("users", TransportKind::Ws));
    let gateway = content(&files, "users/users.gateway.ts");
    assert!(gateway.contains("@WebSocketGateway()\nexport class UsersGateway {"));
    assert!(gateway.contains("@SubscribeMessage('removeUser')"));

    let module = content(&files, "users/users.module.ts");
    assert!(module.contains("import { UsersGateway } from './users.gateway';"));
    assert!(module.contains("  providers: [UsersGateway, UsersService],\n"));
    assert!(!module.contains("controllers"));

    let spec = content(&files, "users/users.gateway.spec.ts");
    assert!(spec.contains("describe('UsersGateway', () => {"));
}

#[test]
fn graphql_code_first_files() {
    let files = generate(with_kind("users", TransportKind::GraphqlCodeFirst));
    let resolver = content(&files, "users/users.resolver.ts");
    assert!(resolver.contains("@Resolver(() => UserType)\nexport class UsersResolver {"));
    assert!(resolver.contains("import { RemoveUserInput } from './input/remove-user.input';"));
    assert!(resolver.contains("async users(\n"));
    assert!(resolver.contains("async user(\n"));

    let module = content(&files, "users/users.module.ts");
    assert!(module.contains("import { User } from '@app/db/entity/user.entity';"));
    assert!(module.contains("imports: [TypeOrmModule.forFeature([User])],"));
    assert!(module.contains("providers: [UsersResolver, UsersService],"));

    let update = content(&files, "users/input/update-user.input.ts");
    assert!(update.contains("import { Field, ID, InputType, PartialType } from '@nestjs/graphql';"));

    let output = content(&files, "users/output/create-user.output.ts");
    assert!(output.contains("@ObjectType()\nexport class CreateUserOutput {"));
    assert!(output.contains("  user!: UserType;\n"));

    let args = content(&files, "users/args/user.args.ts");
    assert!(args.contains("@ArgsType()\nexport class UserArgs {"));
}

#[test]
fn graphql_schema_first_files() {
    let files = generate(with_kind("users", TransportKind::GraphqlSchemaFirst));
    let schema = content(&files, "users/users.graphql");
    assert!(schema.starts_with("type User {\n"));
    assert!(schema.contains("  users: [User]!\n"));
    assert!(schema.contains("  user(id: ID!): User\n"));
    assert!(schema.contains("  createUser(createUserInput: CreateUserInput!): User!\n"));

    let resolver = content(&files, "users/users.resolver.ts");
    assert!(resolver.contains("@Resolver('User')"));
    assert!(resolver.contains("@Query('users')"));

    assert_eq!(
        content(&files, "users/type/user.type.ts"),
        "export class UserType {}\n"
    );
    assert_eq!(
        content(&files, "users/input/create-user.input.ts"),
        "export class CreateUserInput {}\n"
    );
}

#[test]
fn spec_companions() {
    let files = generate(GenerationOptions::new("users"));
    let controller_spec = content(&files, "users/users.controller.spec.ts");
    assert!(controller_spec.contains("describe('UsersController', () => {"));
    assert!(controller_spec.contains("controllers: [UsersController],"));

    let service_spec = content(&files, "users/users.service.spec.ts");
    assert!(service_spec.contains("describe('UsersService', () => {"));
    assert!(service_spec.ends_with("});\n"));
}

#[test]
fn underscore_names_render_with_prefix() {
    let files = generate(GenerationOptions::new("_users"));
    let controller = content(&files, "_users/_users.controller.ts");
    assert!(controller.contains("export class _UsersController {"));
    assert!(controller.contains("@Controller('_users')"));
    assert!(controller.contains("import { Create_UserDto } from './input/create-_user.dto';"));
    assert!(controller.contains("private readonly _usersService: _UsersService"));

    assert_eq!(
        content(&files, "_users/type/_user.type.ts"),
        "export class _UserType {}\n"
    );
}

#[test]
fn every_file_ends_with_newline() {
    for kind in TransportKind::ALL {
        for crud in [true, false] {
            let files = generate(GenerationOptions {
                kind,
                crud,
                ..GenerationOptions::new("orders")
            });
            for file in &files {
                assert!(file.content.ends_with('\n'), "{} ({kind})", file.path);
                assert!(!file.content.starts_with('\n'), "{} ({kind})", file.path);
            }
        }
    }
}

#[test]
fn javascript_is_rejected_before_output() {
    let manifest = plan_resource(&GenerationOptions {
        language: Language::Js,
        ..GenerationOptions::new("users")
    })
    .unwrap();
    let renderer = NestRenderer::new().unwrap();
    assert!(matches!(
        materialize(&manifest, &renderer),
        Err(RenderError::UnsupportedLanguage(Language::Js))
    ));
}
